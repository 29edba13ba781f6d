use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Snapshot pushed by `make_move` and consumed by the matching `unmake_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_ep_file: u8,
    pub prev_halfmove_clock: u16,
}
