//! Pseudo-legal move generation and attack maps.
//!
//! Moves produced here obey piece movement and occupancy but may leave the
//! mover's king attacked; `move_generation` filters them. The generation mode
//! is an explicit argument so every call is reentrant.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::king_moves::{generate_king_moves, king_destinations};
use crate::moves::knight_moves::{generate_knight_moves, knight_destinations};
use crate::moves::move_list::MoveList;
use crate::moves::move_tables::pawn_attacks;
use crate::moves::pawn_moves::generate_pawn_moves;
use crate::moves::sliding_moves::{directions_for, generate_sliding_moves, slider_destinations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Regular moves: squares holding the mover's own pieces are skipped.
    Moves,
    /// Attack maps: own pieces are included as defended squares.
    AttackMap,
}

/// All pseudo-legal moves for `color`, castling excluded.
pub fn generate_pseudo_legal_moves(position: &Position, color: Color, moves: &mut MoveList) {
    let own = position.occupancy(color);
    let occupied = position.occupancy_all;

    for from in own.squares() {
        let Some(piece) = position.piece_at(from) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, from, color, moves),
            PieceKind::Knight => generate_knight_moves(from, own, moves),
            PieceKind::King => generate_king_moves(from, own, moves),
            kind => generate_sliding_moves(from, kind, own, occupied, moves),
        }
    }
}

/// Every square `color` attacks or defends given `occupied`. Pawns contribute
/// their capture diagonals only.
pub fn attack_map(position: &Position, color: Color, occupied: Bitboard) -> Bitboard {
    let own = position.occupancy(color);
    let mut attacked = Bitboard::EMPTY;

    for from in own.squares() {
        let Some(piece) = position.piece_at(from) else {
            continue;
        };
        attacked |= match piece.kind {
            PieceKind::Pawn => pawn_attacks(color, from),
            PieceKind::Knight => knight_destinations(from, own, GenMode::AttackMap),
            PieceKind::King => king_destinations(from, own, GenMode::AttackMap),
            kind => slider_destinations(from, directions_for(kind), own, occupied, GenMode::AttackMap),
        };
    }

    attacked
}

/// Number of pseudo-legal moves `color` would have if it were to move.
pub fn mobility(position: &Position, color: Color) -> u32 {
    let mut moves = MoveList::new();
    generate_pseudo_legal_moves(position, color, &mut moves);
    moves.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_has_twenty_pseudo_legal_moves_each() {
        let position = Position::new_game();
        assert_eq!(mobility(&position, Color::White), 20);
        assert_eq!(mobility(&position, Color::Black), 20);
    }

    #[test]
    fn attack_map_counts_defended_squares_and_pawn_diagonals() {
        let position = Position::new_game();
        let white = attack_map(&position, Color::White, position.occupancy_all);
        // Rank 3 is fully covered; the queen on d1 is defended by the king.
        for file in 1..=8 {
            assert!(white.is_set(make_square(file, 3)));
        }
        assert!(white.is_set(D1));
        assert!(!white.is_set(make_square(5, 4)));
    }

    #[test]
    fn attack_map_uses_supplied_occupancy() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1")
            .expect("FEN should parse");
        let without_king = position.occupancy_all ^ Bitboard::from_square(E1);
        let blocked = attack_map(&position, Color::Black, position.occupancy_all);
        let open = attack_map(&position, Color::Black, without_king);
        assert!(blocked.is_set(E1));
        assert!(!blocked.is_set(F1));
        assert!(open.is_set(F1));
        assert!(open.is_set(H1));
    }
}
