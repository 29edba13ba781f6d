//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so move-selection
//! strategies sit behind a single trait interface.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    /// Shared flag the protocol loop raises to end a running search early.
    fn set_stop_signal(&mut self, _stop: Arc<AtomicBool>) {}

    /// Extra `info string` diagnostics, toggled by `debug on|off`.
    fn set_debug(&mut self, _enabled: bool) {}

    fn set_option(&mut self, name: &str, _value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidCommand(format!("unsupported option '{name}'")))
    }

    /// Picks a move for `position`. `history` holds the moves played from
    /// the standard start position; `None` when the game began from a FEN.
    fn choose_move(
        &mut self,
        position: &Position,
        history: Option<&[Move]>,
        params: &GoParams,
    ) -> ChessResult<EngineOutput>;
}
