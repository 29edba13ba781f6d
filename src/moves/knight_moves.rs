use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::Square;
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;
use crate::moves::move_tables::knight_targets;
use crate::moves::pseudo_legal::GenMode;

/// Knight destinations from `from`; own pieces are dropped unless building an
/// attack map, where they count as defended.
#[inline]
pub fn knight_destinations(from: Square, own: Bitboard, mode: GenMode) -> Bitboard {
    match mode {
        GenMode::Moves => knight_targets(from) & !own,
        GenMode::AttackMap => knight_targets(from),
    }
}

pub fn generate_knight_moves(from: Square, own: Bitboard, moves: &mut MoveList) {
    for to in knight_destinations(from, own, GenMode::Moves).squares() {
        moves.push(Move::quiet(from, to));
    }
}
