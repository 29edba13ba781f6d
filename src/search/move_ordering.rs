use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::moves::chess_move::{Move, MoveFlag};

/// Bonus for any move carrying a special flag.
pub const SPECIAL_FLAG_BONUS: i32 = 50;
/// Bonus for promotions, on top of the special-flag bonus.
pub const PROMOTION_BONUS: i32 = 5_000;

#[inline]
pub fn is_capture(position: &Position, mv: Move) -> bool {
    mv.flag == MoveFlag::EnPassantCapture || position.piece_at(mv.to).is_some()
}

/// Heuristic ordering key; higher scores are searched first.
pub fn score_move(position: &Position, mv: Move) -> i32 {
    let mut score = 0;

    let victim = if mv.flag == MoveFlag::EnPassantCapture {
        Some(PieceKind::Pawn)
    } else {
        position.piece_at(mv.to).map(|p| p.kind)
    };
    if let Some(victim) = victim {
        let attacker = position
            .piece_at(mv.from)
            .map_or(0, |p| p.kind.value());
        score += 10 * victim.value() - attacker;
    }

    if mv.flag != MoveFlag::NoFlag {
        score += SPECIAL_FLAG_BONUS;
    }
    if let Some(kind) = mv.flag.promotion_piece() {
        score += PROMOTION_BONUS + kind.value();
    }

    score
}

/// Sorts moves by descending ordering score. The sort is stable, so equal
/// scores keep generation order.
pub fn order_moves(position: &Position, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| -score_move(position, mv));
}
