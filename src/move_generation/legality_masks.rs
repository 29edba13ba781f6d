//! Check and pin masks computed once per position.
//!
//! One walk along each of the 8 rays leaving the king finds sliding
//! checkers and pinned pieces together. Each pinned piece keeps its own pin
//! ray so that two pins on different lines never widen each other.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_rules::en_passant_captured_square;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::attacked_squares;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::moves::move_tables::{
    is_orthogonal_direction, knight_targets, pawn_attacks, step, SQUARES_TO_EDGE,
};
use crate::moves::sliding_moves::{bishop_attacks, rook_attacks};

#[derive(Debug, Clone)]
pub struct LegalityMasks {
    pub king_square: Square,
    /// Squares the opponent attacks, computed with our king lifted off.
    pub attacked: Bitboard,
    pub checkers: Bitboard,
    pub checks: u32,
    /// Capture-or-block squares for a single check; empty otherwise.
    pub check_ray: Bitboard,
    pub pinned: Bitboard,
    /// For each pinned square: the squares from the king up to and
    /// including the pinning slider.
    pub pin_rays: [Bitboard; 65],
    /// Pawns whose en-passant capture would expose the king.
    pub ep_pinned: Bitboard,
}

impl LegalityMasks {
    pub fn compute(position: &Position) -> Self {
        let us = position.side_to_move;
        let them = us.opposite();
        let king = position.king_square(us);
        let enemy = position.occupancy(them);
        let occupied = position.occupancy_all;

        let mut checkers = (pawn_attacks(us, king) & position.pieces_of(them, PieceKind::Pawn))
            | (knight_targets(king) & position.pieces_of(them, PieceKind::Knight));
        let mut check_ray = checkers;
        let mut pinned = Bitboard::EMPTY;
        let mut pin_rays = [Bitboard::EMPTY; 65];

        for dir in 0..8 {
            let sliders = if is_orthogonal_direction(dir) {
                position.rooks_and_queens(them)
            } else {
                position.bishops_and_queens(them)
            };
            if sliders.is_empty() {
                continue;
            }

            let mut ray = Bitboard::EMPTY;
            let mut blocker = NO_SQUARE;

            for distance in 1..=SQUARES_TO_EDGE[king as usize][dir] {
                let sq = step(king, dir, distance);
                ray.set(sq);
                if !occupied.is_set(sq) {
                    continue;
                }
                if enemy.is_set(sq) {
                    if sliders.is_set(sq) {
                        if blocker == NO_SQUARE {
                            checkers.set(sq);
                            check_ray |= ray;
                        } else {
                            pinned.set(blocker);
                            pin_rays[blocker as usize] = ray;
                        }
                    }
                    break;
                }
                if blocker != NO_SQUARE {
                    break;
                }
                blocker = sq;
            }
        }

        let checks = checkers.count();
        if checks != 1 {
            check_ray = Bitboard::EMPTY;
        }

        Self {
            king_square: king,
            attacked: attacked_squares(position, them),
            checkers,
            checks,
            check_ray,
            pinned,
            pin_rays,
            ep_pinned: en_passant_pins(position, king),
        }
    }

    /// Whether a pseudo-legal move of the side to move keeps its king safe.
    /// Castling candidates are assumed to be gated already.
    pub fn allows(&self, mv: Move) -> bool {
        if mv.from == self.king_square {
            return match mv.flag {
                MoveFlag::Castle => self.checks == 0,
                _ => !self.attacked.is_set(mv.to),
            };
        }
        if self.checks >= 2 {
            return false;
        }

        if mv.flag == MoveFlag::EnPassantCapture {
            if self.ep_pinned.is_set(mv.from) {
                return false;
            }
            let mover = if mv.to > mv.from { Color::White } else { Color::Black };
            let captured = en_passant_captured_square(mover, mv.to);
            return self.checks == 0
                || self.check_ray.is_set(mv.to)
                || self.checkers.is_set(captured);
        }

        if self.pinned.is_set(mv.from) && !self.pin_rays[mv.from as usize].is_set(mv.to) {
            return false;
        }
        self.checks == 0 || self.check_ray.is_set(mv.to)
    }
}

/// Simulates every available en-passant capture and marks the capturing
/// pawns whose move would leave a slider attacking the king. This covers the
/// case where both pawns leave the same rank as well as ordinary pins.
fn en_passant_pins(position: &Position, king: Square) -> Bitboard {
    let Some(ep) = position.ep_square() else {
        return Bitboard::EMPTY;
    };
    let us = position.side_to_move;
    let them = us.opposite();
    let captured = en_passant_captured_square(us, ep);
    let capturers = pawn_attacks(them, ep) & position.pieces_of(us, PieceKind::Pawn);

    let mut ep_pinned = Bitboard::EMPTY;
    for from in capturers.squares() {
        let mut occupied = position.occupancy_all;
        occupied.clear(from);
        occupied.clear(captured);
        occupied.set(ep);

        let exposed = !(rook_attacks(king, occupied) & position.rooks_and_queens(them)).is_empty()
            || !(bishop_attacks(king, occupied) & position.bishops_and_queens(them)).is_empty();
        if exposed {
            ep_pinned.set(from);
        }
    }
    ep_pinned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn single_slider_check_builds_block_ray() {
        let position = Position::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let masks = LegalityMasks::compute(&position);
        assert_eq!(masks.checks, 1);
        assert_eq!(
            masks.check_ray,
            Bitboard::from_squares(&[sq("e2"), sq("e3"), sq("e4")])
        );
        assert!(masks.attacked.is_set(sq("e1")));
    }

    #[test]
    fn double_check_clears_check_ray() {
        let position = Position::from_fen("4k3/8/8/8/4r3/5n2/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let masks = LegalityMasks::compute(&position);
        assert_eq!(masks.checks, 2);
        assert!(masks.check_ray.is_empty());
    }

    #[test]
    fn separate_pins_keep_separate_rays() {
        // Rook pinned on the e-file, bishop pinned on the diagonal.
        let position = Position::from_fen("4r2k/8/8/b7/8/8/3BR3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let masks = LegalityMasks::compute(&position);
        assert_eq!(masks.pinned, Bitboard::from_squares(&[sq("d2"), sq("e2")]));
        assert!(masks.pin_rays[sq("e2") as usize].is_set(sq("e5")));
        assert!(!masks.pin_rays[sq("e2") as usize].is_set(sq("c3")));
        assert!(masks.pin_rays[sq("d2") as usize].is_set(sq("c3")));
        assert!(!masks.pin_rays[sq("d2") as usize].is_set(sq("e5")));
        assert!(masks.allows(Move::quiet(sq("d2"), sq("c3"))));
        assert!(!masks.allows(Move::quiet(sq("d2"), sq("e3"))));
        assert!(masks.allows(Move::quiet(sq("e2"), sq("e8"))));
        assert!(!masks.allows(Move::quiet(sq("e2"), sq("f2"))));
    }

    #[test]
    fn en_passant_exposing_rank_is_pinned() {
        let position = Position::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1")
            .expect("FEN should parse");
        let masks = LegalityMasks::compute(&position);
        assert!(masks.ep_pinned.is_set(sq("b5")));
        assert!(masks.pinned.is_empty());
        assert!(!masks.allows(Move::new(sq("b5"), sq("c6"), MoveFlag::EnPassantCapture)));
    }

    #[test]
    fn en_passant_may_capture_the_checking_pawn() {
        let position = Position::from_fen("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1")
            .expect("FEN should parse");
        let masks = LegalityMasks::compute(&position);
        assert_eq!(masks.checks, 1);
        assert!(masks.allows(Move::new(sq("e4"), sq("d3"), MoveFlag::EnPassantCapture)));
    }
}
