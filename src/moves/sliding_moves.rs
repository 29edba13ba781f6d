//! Ray walking for bishops, rooks and queens.
//!
//! Rays step outward using the edge-distance table, so no square arithmetic
//! ever wraps across a board edge.

use std::ops::Range;

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;
use crate::moves::move_tables::{
    step, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS, SQUARES_TO_EDGE,
};
use crate::moves::pseudo_legal::GenMode;

#[inline]
pub fn directions_for(kind: PieceKind) -> Range<usize> {
    match kind {
        PieceKind::Bishop => BISHOP_DIRECTIONS,
        PieceKind::Rook => ROOK_DIRECTIONS,
        _ => QUEEN_DIRECTIONS,
    }
}

/// Squares along one ray up to and including the first occupied square.
#[inline]
pub fn ray_attacks(from: Square, dir: usize, occupied: Bitboard) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for distance in 1..=SQUARES_TO_EDGE[from as usize][dir] {
        let to = step(from, dir, distance);
        targets.set(to);
        if occupied.is_set(to) {
            break;
        }
    }
    targets
}

pub fn rook_attacks(from: Square, occupied: Bitboard) -> Bitboard {
    ROOK_DIRECTIONS.fold(Bitboard::EMPTY, |acc, dir| acc | ray_attacks(from, dir, occupied))
}

pub fn bishop_attacks(from: Square, occupied: Bitboard) -> Bitboard {
    BISHOP_DIRECTIONS.fold(Bitboard::EMPTY, |acc, dir| acc | ray_attacks(from, dir, occupied))
}

/// Slider destinations: stop before an own piece (or include it as defended
/// in attack-map mode), include and stop at the first opposing piece.
pub fn slider_destinations(
    from: Square,
    directions: Range<usize>,
    own: Bitboard,
    occupied: Bitboard,
    mode: GenMode,
) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for dir in directions {
        targets |= ray_attacks(from, dir, occupied);
    }
    match mode {
        GenMode::Moves => targets & !own,
        GenMode::AttackMap => targets,
    }
}

pub fn generate_sliding_moves(
    from: Square,
    kind: PieceKind,
    own: Bitboard,
    occupied: Bitboard,
    moves: &mut MoveList,
) {
    let targets = slider_destinations(from, directions_for(kind), own, occupied, GenMode::Moves);
    for to in targets.squares() {
        moves.push(Move::quiet(from, to));
    }
}
