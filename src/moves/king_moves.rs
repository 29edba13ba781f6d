//! King steps and castling candidates.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::moves::move_list::MoveList;
use crate::moves::move_tables::king_targets;
use crate::moves::pseudo_legal::GenMode;

struct CastleSpec {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: &'static [Square],
    must_be_safe: &'static [Square],
}

const WHITE_CASTLES: [CastleSpec; 2] = [
    CastleSpec {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        must_be_empty: &[F1, G1],
        must_be_safe: &[E1, F1, G1],
    },
    CastleSpec {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        must_be_empty: &[B1, C1, D1],
        must_be_safe: &[E1, D1, C1],
    },
];

const BLACK_CASTLES: [CastleSpec; 2] = [
    CastleSpec {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        must_be_empty: &[F8, G8],
        must_be_safe: &[E8, F8, G8],
    },
    CastleSpec {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        must_be_empty: &[B8, C8, D8],
        must_be_safe: &[E8, D8, C8],
    },
];

#[inline]
pub fn king_destinations(from: Square, own: Bitboard, mode: GenMode) -> Bitboard {
    match mode {
        GenMode::Moves => king_targets(from) & !own,
        GenMode::AttackMap => king_targets(from),
    }
}

pub fn generate_king_moves(from: Square, own: Bitboard, moves: &mut MoveList) {
    for to in king_destinations(from, own, GenMode::Moves).squares() {
        moves.push(Move::quiet(from, to));
    }
}

/// Castling moves for the side to move. `attacked` is the opponent's attack
/// map; the king's square and every square it crosses must be outside it.
pub fn generate_castling_moves(position: &Position, attacked: Bitboard, moves: &mut MoveList) {
    let color = position.side_to_move;
    let specs = match color {
        Color::White => &WHITE_CASTLES,
        Color::Black => &BLACK_CASTLES,
    };
    let rook = Some(Piece::new(color, PieceKind::Rook));

    for spec in specs {
        if position.castling_rights & spec.right == 0
            || position.king_square(color) != spec.king_from
            || position.piece_at(spec.rook_from) != rook
        {
            continue;
        }
        if spec.must_be_empty.iter().any(|&sq| position.occupancy_all.is_set(sq)) {
            continue;
        }
        if spec.must_be_safe.iter().any(|&sq| attacked.is_set(sq)) {
            continue;
        }
        moves.push(Move::new(spec.king_from, spec.king_to, MoveFlag::Castle));
    }
}
