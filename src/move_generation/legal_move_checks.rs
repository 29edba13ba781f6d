use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_tables::{king_targets, knight_targets, pawn_attacks};
use crate::moves::pseudo_legal::attack_map;
use crate::moves::sliding_moves::{bishop_attacks, rook_attacks};

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let king_sq = position.king_square(color);
    if king_sq == NO_SQUARE {
        return false;
    }
    is_square_attacked(position, king_sq, color.opposite(), position.occupancy_all)
}

/// Whether `attacker_color` attacks `square` under the given occupancy.
/// Works backwards from the target, so no attack map is built.
pub fn is_square_attacked(
    position: &Position,
    square: Square,
    attacker_color: Color,
    occupied: Bitboard,
) -> bool {
    !attackers_to_square(position, square, attacker_color, occupied).is_empty()
}

pub fn attackers_to_square(
    position: &Position,
    square: Square,
    attacker_color: Color,
    occupied: Bitboard,
) -> Bitboard {
    let pawns = position.pieces_of(attacker_color, PieceKind::Pawn);
    let knights = position.pieces_of(attacker_color, PieceKind::Knight);
    let kings = position.pieces_of(attacker_color, PieceKind::King);

    (pawn_attacks(attacker_color.opposite(), square) & pawns)
        | (knight_targets(square) & knights)
        | (king_targets(square) & kings)
        | (bishop_attacks(square, occupied) & position.bishops_and_queens(attacker_color))
        | (rook_attacks(square, occupied) & position.rooks_and_queens(attacker_color))
}

/// Squares attacked by `attacker_color` with the defending king lifted off
/// the board, so a slider's ray continues through the king's square.
pub fn attacked_squares(position: &Position, attacker_color: Color) -> Bitboard {
    let defender_king = position.king_square(attacker_color.opposite());
    let mut occupied = position.occupancy_all;
    if defender_king != NO_SQUARE {
        occupied.clear(defender_king);
    }
    attack_map(position, attacker_color, occupied)
}
