//! Static position evaluation.
//!
//! Search stays independent of the heuristic by scoring through the
//! `BoardScorer` trait. The stock scorer combines material with a mobility
//! term; `evaluate` adds terminal detection for reporting.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::GameStatus;
use crate::moves::pseudo_legal::mobility;

pub const MATE_SCORE: i32 = 30_000;

/// Centipawns per pseudo-legal move of difference between the sides.
pub const MOBILITY_WEIGHT: i32 = 2;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, position: &Position) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub fn material_balance_white_minus_black(position: &Position) -> i32 {
        ALL_PIECE_KINDS
            .iter()
            .map(|&kind| {
                let white = position.pieces_of(Color::White, kind).count() as i32;
                let black = position.pieces_of(Color::Black, kind).count() as i32;
                (white - black) * kind.value()
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        Self::material_balance_white_minus_black(position) * position.side_to_move.sign()
    }
}

/// Material plus the difference in pseudo-legal move counts. Both sides are
/// counted on the same board, without flipping the side to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialMobilityScorer;

impl MaterialMobilityScorer {
    pub fn white_minus_black(position: &Position) -> i32 {
        let material = MaterialScorer::material_balance_white_minus_black(position);
        let white_moves = mobility(position, Color::White) as i32;
        let black_moves = mobility(position, Color::Black) as i32;
        material + MOBILITY_WEIGHT * (white_moves - black_moves)
    }
}

impl BoardScorer for MaterialMobilityScorer {
    fn score(&self, position: &Position) -> i32 {
        Self::white_minus_black(position) * position.side_to_move.sign()
    }
}

/// White-positive evaluation. A checkmated side scores the full mate value
/// against it; stalemate is a draw.
pub fn evaluate(position: &Position) -> i32 {
    match generate_legal_moves(position).status() {
        GameStatus::Checkmate => -MATE_SCORE * position.side_to_move.sign(),
        GameStatus::Stalemate => 0,
        GameStatus::Ongoing => MaterialMobilityScorer::white_minus_black(position),
    }
}
