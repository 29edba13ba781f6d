use crate::game_state::position::Position;
use crate::moves::move_list::MoveList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// Legal moves of the side to move plus the number of pieces giving check.
#[derive(Clone)]
pub struct LegalMoves {
    pub moves: MoveList,
    pub checks: u32,
}

impl LegalMoves {
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checks > 0
    }

    pub fn status(&self) -> GameStatus {
        match (self.moves.is_empty(), self.in_check()) {
            (false, _) => GameStatus::Ongoing,
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
        }
    }
}

/// Seam between legal-move producers and their consumers (perft, search).
///
/// Implementations may temporarily mutate the position but must hand it back
/// unchanged.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &mut Position) -> LegalMoves;
}
