//! Canonical chess-rule constants.
//!
//! Static literals used to initialize positions and to keep castling rights
//! consistent with piece movement.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rights that survive a move touching a square, indexed by square.
///
/// A move keeps `rights & CASTLING_KEEP_MASK[from] & CASTLING_KEEP_MASK[to]`,
/// so a king or rook leaving home and a rook being captured at home both
/// revoke the matching rights.
pub const CASTLING_KEEP_MASK: [CastlingRights; 65] = build_castling_keep_mask();

const fn build_castling_keep_mask() -> [CastlingRights; 65] {
    let mut table = [CASTLE_ALL; 65];
    table[E1 as usize] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    table[H1 as usize] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    table[A1 as usize] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    table[E8 as usize] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    table[H8 as usize] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    table[A8 as usize] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    table
}

/// Rook relocation for a castling king move, keyed by the king's destination.
#[inline]
pub const fn castling_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        G1 => Some((H1, F1)),
        C1 => Some((A1, D1)),
        G8 => Some((H8, F8)),
        C8 => Some((A8, D8)),
        _ => None,
    }
}

/// Last rank for pawns of `color`.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 8,
        Color::Black => 1,
    }
}

/// Rank of the en-passant target square when `color` is to move.
#[inline]
pub const fn en_passant_target_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 3,
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub const fn en_passant_captured_square(mover: Color, to: Square) -> Square {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_mask_revokes_only_touched_corners() {
        assert_eq!(CASTLING_KEEP_MASK[E1 as usize] & CASTLE_WHITE_KINGSIDE, 0);
        assert_eq!(CASTLING_KEEP_MASK[E1 as usize] & CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_KINGSIDE);
        assert_eq!(CASTLING_KEEP_MASK[A8 as usize], CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE);
        assert_eq!(CASTLING_KEEP_MASK[make_square(4, 4) as usize], CASTLE_ALL);
    }
}
