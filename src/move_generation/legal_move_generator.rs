//! Full legal move generation pipeline.
//!
//! `MaskLegalMoveGenerator` filters pseudo-legal moves through precomputed
//! check and pin masks without touching the board. `NaiveLegalMoveGenerator`
//! plays each candidate and asks whether the king is attacked afterwards; it
//! is far slower and serves as a cross-check.

use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::{attacked_squares, is_king_in_check};
use crate::move_generation::legality_masks::LegalityMasks;
use crate::move_generation::move_generator::{LegalMoves, MoveGenerator};
use crate::moves::chess_move::Move;
use crate::moves::king_moves::generate_castling_moves;
use crate::moves::move_list::MoveList;
use crate::moves::pseudo_legal::generate_pseudo_legal_moves;

pub struct MaskLegalMoveGenerator;
pub struct NaiveLegalMoveGenerator;

impl MoveGenerator for MaskLegalMoveGenerator {
    fn generate_legal_moves(&self, position: &mut Position) -> LegalMoves {
        generate_legal_moves(position)
    }
}

impl MoveGenerator for NaiveLegalMoveGenerator {
    fn generate_legal_moves(&self, position: &mut Position) -> LegalMoves {
        let us = position.side_to_move;
        let mut pseudo = MoveList::new();
        generate_pseudo_legal_moves(position, us, &mut pseudo);

        let in_check = is_king_in_check(position, us);
        if !in_check {
            let attacked = attacked_squares(position, us.opposite());
            generate_castling_moves(position, attacked, &mut pseudo);
        }

        let mut moves = MoveList::new();
        for &mv in pseudo.iter() {
            make_move(position, mv);
            if !is_king_in_check(position, us) {
                moves.push(mv);
            }
            unmake_move(position, mv);
        }

        let checks = if in_check {
            LegalityMasks::compute(position).checks
        } else {
            0
        };
        LegalMoves { moves, checks }
    }
}

/// Legal moves of the side to move using the check/pin masks.
pub fn generate_legal_moves(position: &Position) -> LegalMoves {
    let masks = LegalityMasks::compute(position);
    let us = position.side_to_move;

    let mut pseudo = MoveList::new();
    generate_pseudo_legal_moves(position, us, &mut pseudo);
    if masks.checks == 0 {
        generate_castling_moves(position, masks.attacked, &mut pseudo);
    }

    let mut moves = MoveList::new();
    moves.extend(pseudo.iter().copied().filter(|&mv| masks.allows(mv)));

    LegalMoves {
        moves,
        checks: masks.checks,
    }
}

/// Checks a parsed move against the position without mutating it.
///
/// Cheap ownership and occupancy tests run first; only then is the full
/// legal list consulted.
pub fn validate_move(position: &Position, mv: Move) -> ChessResult<Move> {
    let us = position.side_to_move;

    let Some(piece) = position.piece_at(mv.from) else {
        return Err(ChessError::IllegalMove(format!("{mv}: no piece on origin square")));
    };
    if piece.color != us {
        return Err(ChessError::IllegalMove(format!("{mv}: piece belongs to the opponent")));
    }
    if position.occupancy(us).is_set(mv.to) {
        return Err(ChessError::IllegalMove(format!("{mv}: destination holds own piece")));
    }

    if generate_legal_moves(position).moves.contains(&mv) {
        Ok(mv)
    } else {
        Err(ChessError::IllegalMove(format!("{mv} is not legal here")))
    }
}
