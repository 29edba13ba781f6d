use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_move_time, TimeManagementStrategy};
use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::MaterialMobilityScorer;
use crate::search::iterative_deepening::{iterative_deepening_search_with, SearchConfig};
use crate::tables::opening_book::OpeningBook;

pub const DEFAULT_DEPTH: u8 = 5;
/// Depth ceiling when only time, nodes or `stop` bound the search.
pub const MAX_SEARCH_DEPTH: u8 = 64;

/// Book first, then iterative deepening with material and mobility scoring.
pub struct IterativeEngine {
    default_depth: u8,
    own_book: bool,
    book: OpeningBook,
    rng: StdRng,
    stop: Option<Arc<AtomicBool>>,
    scorer: MaterialMobilityScorer,
    time_strategy: TimeManagementStrategy,
    debug: bool,
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::with_rng(default_depth, StdRng::from_os_rng())
    }

    /// Deterministic book choices for a given seed.
    pub fn with_seed(default_depth: u8, seed: u64) -> Self {
        Self::with_rng(default_depth, StdRng::seed_from_u64(seed))
    }

    fn with_rng(default_depth: u8, rng: StdRng) -> Self {
        Self {
            default_depth: default_depth.clamp(1, MAX_SEARCH_DEPTH),
            own_book: true,
            book: OpeningBook::load_default(),
            rng,
            stop: None,
            scorer: MaterialMobilityScorer,
            time_strategy: TimeManagementStrategy::Adaptive,
            debug: false,
        }
    }

    pub fn default_depth(&self) -> u8 {
        self.default_depth
    }

    pub fn own_book(&self) -> bool {
        self.own_book
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    fn book_move(
        &mut self,
        position: &Position,
        history: Option<&[Move]>,
        out: &mut EngineOutput,
    ) -> Option<Move> {
        if !self.own_book {
            return None;
        }
        let Some(history) = history.filter(|h| self.book.in_book(h)) else {
            if self.debug {
                out.info_lines.push("info string out of book".to_owned());
            }
            return None;
        };

        match self.book.choose_move(position, history, &mut self.rng) {
            Ok(mv) => {
                out.info_lines.push(format!("info string book move {mv}"));
                Some(mv)
            }
            Err(err) => {
                out.info_lines.push(format!("info string {err}"));
                None
            }
        }
    }

    fn search_config(&self, position: &Position, params: &GoParams) -> SearchConfig {
        let movetime_ms = resolve_move_time(position, params, self.time_strategy);
        let open_ended = movetime_ms.is_some() || params.nodes.is_some() || params.infinite;
        let max_depth = match params.depth {
            Some(depth) => depth.clamp(1, MAX_SEARCH_DEPTH),
            None if open_ended => MAX_SEARCH_DEPTH,
            None => self.default_depth,
        };
        SearchConfig {
            max_depth,
            movetime_ms,
            max_nodes: params.nodes,
            stop_flag: self.stop.clone(),
        }
    }
}

fn parse_check(name: &str, value: &str) -> ChessResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ChessError::InvalidCommand(format!(
            "invalid {name} value '{value}'"
        ))),
    }
}

impl Engine for IterativeEngine {
    fn set_stop_signal(&mut self, stop: Arc<AtomicBool>) {
        self.stop = Some(stop);
    }

    fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("OwnBook") {
            self.own_book = parse_check(name, value)?;
        } else if name.eq_ignore_ascii_case("Depth") {
            let depth = value
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=MAX_SEARCH_DEPTH).contains(d))
                .ok_or_else(|| {
                    ChessError::InvalidCommand(format!("invalid Depth value '{value}'"))
                })?;
            self.default_depth = depth;
        } else if name.eq_ignore_ascii_case("BookFile") {
            let path = value.trim();
            if path.is_empty() || path == "<empty>" {
                self.book = OpeningBook::load_default();
                return Ok(());
            }
            match OpeningBook::from_path(path) {
                Ok(book) => self.book = book,
                Err(err) => {
                    self.book = OpeningBook::load_default();
                    return Err(err);
                }
            }
        } else {
            return Err(ChessError::InvalidCommand(format!(
                "unsupported option '{name}'"
            )));
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        position: &Position,
        history: Option<&[Move]>,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let mut out = EngineOutput::default();
        if let Some(mv) = self.book_move(position, history, &mut out) {
            out.best_move = Some(mv);
            return Ok(out);
        }

        let config = self.search_config(position, params);
        if self.debug {
            out.info_lines.push(format!(
                "info string search limits depth {} movetime {:?} nodes {:?}",
                config.max_depth, config.movetime_ms, config.max_nodes
            ));
        }

        let result = iterative_deepening_search_with(position, &self.scorer, &config, |info| {
            out.info_lines.push(info.uci_line())
        });
        if result.aborted {
            out.info_lines.push(format!(
                "info string search stopped during depth {}",
                result.reached_depth + 1
            ));
        }
        if self.debug {
            out.info_lines.push(format!(
                "info string searched {} nodes in {} ms ({} nps)",
                result.nodes, result.elapsed_ms, result.nps
            ));
        }

        out.best_move = result.best_move;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::validate_move;
    use crate::utils::long_algebraic::parse_uci_move;

    fn fixed_depth(depth: u8) -> GoParams {
        GoParams {
            depth: Some(depth),
            ..GoParams::default()
        }
    }

    #[test]
    fn start_position_uses_book() {
        let mut engine = IterativeEngine::with_seed(3, 11);
        let position = Position::new_game();
        let out = engine
            .choose_move(&position, Some(&[][..]), &fixed_depth(3))
            .expect("engine should answer");
        let mv = out.best_move.expect("book move expected");
        let text = mv.to_string();
        assert!(["e2e4", "d2d4", "c2c4", "g1f3"].contains(&text.as_str()));
        assert!(out.info_lines[0].starts_with("info string book move"));
    }

    #[test]
    fn unknown_history_skips_book() {
        let mut engine = IterativeEngine::with_seed(2, 11);
        let position = Position::new_game();
        let out = engine
            .choose_move(&position, None, &fixed_depth(2))
            .expect("engine should answer");
        assert!(out.info_lines[0].starts_with("info depth 1"));
        assert_eq!(out.info_lines.len(), 2);
        let mv = out.best_move.expect("search move expected");
        assert!(validate_move(&position, mv).is_ok());
    }

    #[test]
    fn own_book_off_searches() {
        let mut engine = IterativeEngine::with_seed(1, 5);
        engine
            .set_option("OwnBook", "false")
            .expect("OwnBook should parse");
        assert!(!engine.own_book());
        let out = engine
            .choose_move(&Position::new_game(), Some(&[][..]), &GoParams::default())
            .expect("engine should answer");
        assert!(out.info_lines[0].starts_with("info depth 1"));
    }

    #[test]
    fn engine_finds_mate_in_one() {
        let fen = "6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1";
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut engine = IterativeEngine::with_seed(4, 1);
        let out = engine
            .choose_move(&position, None, &GoParams::default())
            .expect("engine should answer");
        assert_eq!(
            out.best_move,
            Some(parse_uci_move(&position, "e1e8").expect("parses"))
        );
        assert!(out.info_lines[0].contains("score mate 1"));
    }

    #[test]
    fn raised_stop_flag_still_answers() {
        let mut engine = IterativeEngine::with_seed(6, 1);
        let stop = Arc::new(AtomicBool::new(true));
        engine.set_stop_signal(Arc::clone(&stop));
        let params = GoParams {
            infinite: true,
            ..GoParams::default()
        };
        let out = engine
            .choose_move(&Position::new_game(), None, &params)
            .expect("engine should answer");
        assert!(out.best_move.is_some());
        assert_eq!(out.info_lines, vec!["info string search stopped during depth 1"]);
    }

    #[test]
    fn search_limits_follow_go_params() {
        let engine = IterativeEngine::with_seed(4, 1);
        let position = Position::new_game();

        let config = engine.search_config(&position, &GoParams::default());
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.movetime_ms, None);

        let timed = GoParams {
            movetime_ms: Some(250),
            ..GoParams::default()
        };
        let config = engine.search_config(&position, &timed);
        assert_eq!(config.max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(config.movetime_ms, Some(250));

        let capped = GoParams {
            depth: Some(200),
            nodes: Some(10_000),
            ..GoParams::default()
        };
        let config = engine.search_config(&position, &capped);
        assert_eq!(config.max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(config.max_nodes, Some(10_000));
    }

    #[test]
    fn options_validate_values() {
        let mut engine = IterativeEngine::with_seed(5, 1);
        engine.set_option("Depth", "7").expect("Depth should parse");
        assert_eq!(engine.default_depth(), 7);
        assert!(engine.set_option("Depth", "0").is_err());
        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("OwnBook", "maybe").is_err());
        assert!(engine.set_option("Hash", "64").is_err());
        assert_eq!(engine.default_depth(), 7);
    }

    #[test]
    fn unreadable_book_file_falls_back_to_embedded_book() {
        let mut engine = IterativeEngine::with_seed(5, 1);
        let err = engine
            .set_option("BookFile", "no/such/book.txt")
            .expect_err("missing file should be reported");
        assert!(matches!(err, ChessError::OpeningBook(_)));
        assert_eq!(
            engine.book().line_count(),
            OpeningBook::load_default().line_count()
        );
    }
}
