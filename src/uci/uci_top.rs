//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position and move history,
//! runs `go` on a background thread that `stop` can cancel, and funnels every
//! output line through one channel to a printer thread so search output and
//! command replies never interleave mid-line.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::engines::engine_iterative::{IterativeEngine, DEFAULT_DEPTH, MAX_SEARCH_DEPTH};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::GameStatus;
use crate::move_generation::perft::perft_divide;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::evaluate;
use crate::utils::long_algebraic::parse_legal_uci_move;
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = concat!("Tactix ", env!("CARGO_PKG_VERSION"));
const UCI_ENGINE_AUTHOR: &str = "the Tactix developers";

type SharedEngine = Arc<Mutex<Box<dyn Engine>>>;

pub fn run_stdio_loop() -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    let printer = thread::spawn(move || -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in rx {
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        Ok(())
    });

    let mut uci = UciState::new(tx);
    for line in io::stdin().lock().lines() {
        if uci.handle_command(&line?) {
            break;
        }
    }
    uci.stop_search();
    drop(uci);

    printer
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("printer thread panicked")))
}

struct UciState {
    position: Position,
    /// Moves from the standard start position; `None` after `position fen`.
    history: Option<Vec<Move>>,
    engine: SharedEngine,
    stop: Arc<AtomicBool>,
    search: Option<JoinHandle<()>>,
    debug_mode: bool,
    out: Sender<String>,
}

impl UciState {
    fn new(out: Sender<String>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let mut engine: Box<dyn Engine> = Box::new(IterativeEngine::new(DEFAULT_DEPTH));
        engine.set_stop_signal(Arc::clone(&stop));
        Self {
            position: Position::new_game(),
            history: Some(Vec::new()),
            engine: Arc::new(Mutex::new(engine)),
            stop,
            search: None,
            debug_mode: false,
            out,
        }
    }

    fn emit(&self, line: impl Into<String>) {
        // The printer only goes away at shutdown.
        let _ = self.out.send(line.into());
    }

    fn engine(&self) -> MutexGuard<'_, Box<dyn Engine>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles one input line; returns true on `quit`.
    fn handle_command(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        let Some(cmd) = trimmed.split_whitespace().next() else {
            return false;
        };

        let result = match cmd {
            "uci" => {
                self.emit(format!("id name {UCI_ENGINE_NAME}"));
                self.emit(format!("id author {UCI_ENGINE_AUTHOR}"));
                self.emit("option name OwnBook type check default true");
                self.emit(format!(
                    "option name Depth type spin default {DEFAULT_DEPTH} min 1 max {MAX_SEARCH_DEPTH}"
                ));
                self.emit("option name BookFile type string default <empty>");
                self.emit("uciok");
                Ok(())
            }
            "isready" => {
                self.emit("readyok");
                Ok(())
            }
            "ucinewgame" => {
                self.stop_search();
                self.position = Position::new_game();
                self.history = Some(Vec::new());
                self.engine().new_game();
                Ok(())
            }
            "position" => self.handle_position(trimmed),
            "go" => self.handle_go(trimmed),
            "stop" => {
                self.stop_search();
                Ok(())
            }
            "quit" => {
                self.stop_search();
                return true;
            }
            "debug" => self.handle_debug(trimmed),
            "setoption" => self.handle_setoption(trimmed),
            "d" | "print" => {
                self.print_board();
                Ok(())
            }
            "eval" => {
                self.emit(format!(
                    "Evaluation: {} (positive favours White)",
                    evaluate(&self.position)
                ));
                Ok(())
            }
            "move" | "m" => self.handle_move(trimmed),
            "perft" => self.handle_perft(trimmed),
            "moves" => {
                self.print_moves();
                Ok(())
            }
            "help" | "h" => {
                self.print_help();
                Ok(())
            }
            _ => {
                self.emit(format!("info string unknown command: {cmd}"));
                Ok(())
            }
        };

        if let Err(err) = result {
            self.emit(format!("info string {cmd} error: {err}"));
            if cmd == "go" {
                self.emit("bestmove 0000");
            }
        }
        false
    }

    fn handle_debug(&mut self, line: &str) -> ChessResult<()> {
        let enabled = match line.split_whitespace().nth(1) {
            Some("on") => true,
            Some("off") => false,
            other => {
                return Err(ChessError::InvalidCommand(format!(
                    "expected 'on' or 'off', got '{}'",
                    other.unwrap_or_default()
                )))
            }
        };
        // A running search owns the engine; the flag reaches it at the next `go`.
        self.debug_mode = enabled;
        Ok(())
    }

    fn handle_setoption(&mut self, line: &str) -> ChessResult<()> {
        let mut name_tokens = Vec::new();
        let mut value_tokens = Vec::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" if mode != "value" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");
        if name.is_empty() {
            return Err(ChessError::InvalidCommand(
                "expected 'setoption name <id> [value <x>]'".to_owned(),
            ));
        }

        self.stop_search();
        self.engine().set_option(&name, &value)?;
        self.emit(format!("info string {name} set to {value}"));
        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let (mut position, mut history) = match tokens.next() {
            Some("startpos") => (Position::new_game(), Some(Vec::new())),
            Some("fen") => {
                let mut fen_parts = Vec::new();
                while let Some(tok) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(tok);
                }
                if fen_parts.is_empty() {
                    return Err(ChessError::InvalidCommand(
                        "missing FEN after 'position fen'".to_owned(),
                    ));
                }
                let fen = fen_parts.join(" ");
                let history = (fen == STARTING_POSITION_FEN).then(Vec::new);
                (Position::from_fen(&fen)?, history)
            }
            Some(other) => {
                return Err(ChessError::InvalidCommand(format!(
                    "unsupported position token '{other}'"
                )))
            }
            None => {
                return Err(ChessError::InvalidCommand(
                    "incomplete position command".to_owned(),
                ))
            }
        };

        if tokens.next_if_eq(&"moves").is_some() {
            for text in tokens {
                let mv = parse_legal_uci_move(&position, text)?;
                make_move(&mut position, mv);
                if let Some(history) = history.as_mut() {
                    history.push(mv);
                }
            }
        }

        self.stop_search();
        self.position = position;
        self.history = history;
        Ok(())
    }

    fn handle_go(&mut self, line: &str) -> ChessResult<()> {
        let params = parse_go_params(line)?;
        self.stop_search();
        self.stop.store(false, Ordering::Relaxed);

        let engine = Arc::clone(&self.engine);
        let out = self.out.clone();
        let position = self.position.clone();
        let history = self.history.clone();
        let debug = self.debug_mode;

        self.search = Some(thread::spawn(move || {
            let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
            engine.set_debug(debug);
            let lines = match engine.choose_move(&position, history.as_deref(), &params) {
                Ok(output) => {
                    let best = output.best_move.unwrap_or(Move::NULL);
                    let mut lines = output.info_lines;
                    lines.push(format!("bestmove {best}"));
                    lines
                }
                Err(err) => vec![
                    format!("info string go error: {err}"),
                    "bestmove 0000".to_owned(),
                ],
            };
            for line in lines {
                let _ = out.send(line);
            }
        }));
        Ok(())
    }

    /// Raises the stop flag and waits for the running search to print its
    /// `bestmove`.
    fn stop_search(&mut self) {
        if let Some(handle) = self.search.take() {
            self.stop.store(true, Ordering::Relaxed);
            if handle.join().is_err() {
                self.emit("info string search thread panicked");
                self.emit("bestmove 0000");
            }
        }
    }

    fn handle_move(&mut self, line: &str) -> ChessResult<()> {
        let text = line.split_whitespace().nth(1).ok_or_else(|| {
            ChessError::InvalidCommand("expected 'move <uci move>'".to_owned())
        })?;
        let mv = parse_legal_uci_move(&self.position, text)?;

        self.stop_search();
        make_move(&mut self.position, mv);
        if let Some(history) = self.history.as_mut() {
            history.push(mv);
        }
        self.print_board();
        Ok(())
    }

    fn handle_perft(&mut self, line: &str) -> ChessResult<()> {
        let depth = line
            .split_whitespace()
            .nth(1)
            .and_then(|tok| tok.parse::<u8>().ok())
            .ok_or_else(|| ChessError::InvalidCommand("expected 'perft <depth>'".to_owned()))?;

        let started = Instant::now();
        let mut position = self.position.clone();
        let divided = perft_divide(&mut position, depth);
        let total: u64 = if depth == 0 {
            1
        } else {
            divided.iter().map(|(_, nodes)| nodes).sum()
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        for (mv, nodes) in &divided {
            self.emit(format!("{mv}: {nodes}"));
        }
        self.emit(format!("Total nodes: {total}"));
        let nps = total.saturating_mul(1000) / elapsed_ms.max(1);
        self.emit(format!("Time: {elapsed_ms} ms ({nps} nps)"));
        Ok(())
    }

    fn print_board(&self) {
        self.emit(render_game_state(&self.position));
        self.emit(format!("Fen: {}", self.position.to_fen()));
    }

    fn print_moves(&self) {
        let legal = generate_legal_moves(&self.position);
        let listed: Vec<String> = legal.moves.iter().map(Move::to_string).collect();
        self.emit(format!("Legal moves ({}): {}", listed.len(), listed.join(" ")));
        match legal.status() {
            GameStatus::Checkmate => self.emit("Checkmate"),
            GameStatus::Stalemate => self.emit("Stalemate"),
            GameStatus::Ongoing if legal.in_check() => self.emit("Check"),
            GameStatus::Ongoing => {}
        }
    }

    fn print_help(&self) {
        for line in [
            "Commands:",
            "  uci | isready | ucinewgame | stop | quit",
            "  position startpos|fen <fen> [moves <m1> <m2> ...]",
            "  go [depth d] [movetime ms] [wtime ms] [btime ms] [winc ms] [binc ms]",
            "     [movestogo n] [nodes n] [infinite]",
            "  setoption name <id> [value <x>]   (OwnBook, Depth, BookFile)",
            "  debug on|off",
            "  d | print       show the board",
            "  eval            static evaluation",
            "  move | m <m>    play a move",
            "  moves           list legal moves",
            "  perft <depth>   count leaf nodes per root move",
            "  help | h        this message",
        ] {
            self.emit(line);
        }
    }
}

fn parse_go_params(line: &str) -> ChessResult<GoParams> {
    fn value<T: std::str::FromStr>(key: &str, tok: Option<&str>) -> ChessResult<Option<T>> {
        tok.and_then(|t| t.parse::<T>().ok())
            .map(Some)
            .ok_or_else(|| ChessError::InvalidCommand(format!("invalid value for '{key}'")))
    }

    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(tok) = tokens.next() {
        match tok {
            "depth" => params.depth = value(tok, tokens.next())?,
            "movetime" => params.movetime_ms = value(tok, tokens.next())?,
            "wtime" => params.wtime_ms = value(tok, tokens.next())?,
            "btime" => params.btime_ms = value(tok, tokens.next())?,
            "winc" => params.winc_ms = value(tok, tokens.next())?,
            "binc" => params.binc_ms = value(tok, tokens.next())?,
            "movestogo" => params.movestogo = value(tok, tokens.next())?,
            "nodes" => params.nodes = value(tok, tokens.next())?,
            "infinite" => params.infinite = true,
            // Unsupported keywords (ponder, mate, searchmoves) are ignored.
            _ => {}
        }
    }
    Ok(params)
}
