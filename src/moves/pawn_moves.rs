//! Pawn pushes, captures, promotions and en passant.

use crate::game_state::chess_rules::{en_passant_captured_square, promotion_rank};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::{Move, MoveFlag, PROMOTION_FLAGS};
use crate::moves::move_list::MoveList;
use crate::moves::move_tables::pawn_attacks;

#[inline]
const fn start_rank(color: Color) -> u8 {
    match color {
        Color::White => 2,
        Color::Black => 7,
    }
}

#[inline]
const fn forward(square: Square, color: Color) -> Square {
    match color {
        Color::White => square + 8,
        Color::Black => square - 8,
    }
}

/// Pseudo-legal moves of the pawn of `color` standing on `from`.
///
/// En passant is only produced for the side to move, since the stored
/// en-passant file belongs to the position's current turn.
pub fn generate_pawn_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    let occupied = position.occupancy_all;

    if rank_of(from) != promotion_rank(color) {
        let one = forward(from, color);
        if !occupied.is_set(one) {
            push_pawn_move(from, one, color, moves);

            if rank_of(from) == start_rank(color) {
                let two = forward(one, color);
                if !occupied.is_set(two) {
                    moves.push(Move::new(from, two, MoveFlag::DoublePawnPush));
                }
            }
        }
    }

    let attacks = pawn_attacks(color, from);
    for to in (attacks & position.occupancy(color.opposite())).squares() {
        push_pawn_move(from, to, color, moves);
    }

    if color == position.side_to_move {
        if let Some(ep) = position.ep_square() {
            let victim = Piece::new(color.opposite(), PieceKind::Pawn);
            if attacks.is_set(ep)
                && !occupied.is_set(ep)
                && position.piece_at(en_passant_captured_square(color, ep)) == Some(victim)
            {
                moves.push(Move::new(from, ep, MoveFlag::EnPassantCapture));
            }
        }
    }
}

/// Pushes `from -> to`, expanded into the four promotions on the last rank.
#[inline]
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if rank_of(to) == promotion_rank(color) {
        for flag in PROMOTION_FLAGS {
            moves.push(Move::new(from, to, flag));
        }
    } else {
        moves.push(Move::quiet(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves(fen: &str, square: &str) -> MoveList {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let from = crate::utils::algebraic::algebraic_to_square(square).expect("square");
        let color = position.piece_at(from).expect("pawn on square").color;
        let mut moves = MoveList::new();
        generate_pawn_moves(&position, from, color, &mut moves);
        moves
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let moves = pawn_moves(crate::game_state::chess_rules::STARTING_POSITION_FEN, "e2");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::new(13, 29, MoveFlag::DoublePawnPush)));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_expands_into_four_moves() {
        let moves = pawn_moves("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1", "e7");
        // e8 is empty push, d8 capture: 2 destinations x 4 pieces.
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&Move::new(53, 61, MoveFlag::PromoteQueen)));
        assert!(moves.contains(&Move::new(53, 60, MoveFlag::PromoteKnight)));
    }

    #[test]
    fn en_passant_capture_is_flagged() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5");
        assert!(moves.contains(&Move::new(37, 44, MoveFlag::EnPassantCapture)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn en_passant_needs_a_pawn_to_capture() {
        let mut position =
            Position::from_fen("4k3/8/8/3P4/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        position.ep_file = 5;
        let mut moves = MoveList::new();
        generate_pawn_moves(&position, 36, Color::White, &mut moves);
        assert_eq!(moves.len(), 1);
        assert!(!moves.iter().any(|mv| mv.flag == MoveFlag::EnPassantCapture));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/3p4/2N5/8/8/8/8/4K3 b - - 0 1", "d7");
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&Move::new(52, 43, MoveFlag::NoFlag)));
    }
}
