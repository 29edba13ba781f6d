//! Move-time budgeting and the search timer.
//!
//! UCI passes raw clock data (`wtime/btime/winc/binc/movetime`) and the
//! engine decides the per-move allocation according to a strategy.

use std::time::{Duration, Instant};

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeManagementStrategy {
    /// Fixed rule: spend 1/20th of the remaining clock.
    Fraction20,
    /// Clock, increment and game phase aware.
    Adaptive,
}

/// Per-move budget in milliseconds, or `None` when the search should only
/// stop on depth, node count or an explicit `stop`.
pub fn resolve_move_time(
    position: &Position,
    params: &GoParams,
    strategy: TimeManagementStrategy,
) -> Option<u64> {
    if params.infinite {
        return None;
    }
    if let Some(movetime) = params.movetime_ms {
        return Some(movetime.max(1));
    }

    let (remaining, inc) = match position.side_to_move {
        Color::White => (params.wtime_ms, params.winc_ms),
        Color::Black => (params.btime_ms, params.binc_ms),
    };

    remaining.map(|remaining| match strategy {
        TimeManagementStrategy::Fraction20 => (remaining / 20).max(1),
        TimeManagementStrategy::Adaptive => {
            adaptive_budget_ms(position, remaining, inc, params.movestogo)
        }
    })
}

fn adaptive_budget_ms(
    position: &Position,
    remaining_ms: u64,
    inc_ms: Option<u64>,
    movestogo: Option<u16>,
) -> u64 {
    let fullmove = u64::from(position.fullmove_number);
    let expected_moves_left = if let Some(mtg) = movestogo {
        u64::from(mtg.max(1))
    } else if fullmove < 10 {
        40
    } else if fullmove < 30 {
        28
    } else {
        18
    };

    let reserve = (remaining_ms / 25).clamp(100, remaining_ms.saturating_sub(1).max(100));
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / expected_moves_left;
    let inc_bonus = inc_ms.unwrap_or(0).saturating_mul(3) / 4;
    let target = base.saturating_add(inc_bonus);

    let min_budget = if remaining_ms < 1_000 { 5 } else { 15 };
    let max_budget = (remaining_ms / 4).max(1);
    target.clamp(min_budget.min(max_budget), max_budget)
}

/// Deadline derived from a move-time budget.
#[derive(Debug, Clone, Copy)]
pub struct MoveTimer {
    started_at: Instant,
    deadline: Option<Instant>,
}

impl MoveTimer {
    pub fn start(budget_ms: Option<u64>) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: budget_ms.map(|ms| started_at + Duration::from_millis(ms)),
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GoParams {
        GoParams {
            wtime_ms: Some(60_000),
            btime_ms: Some(30_000),
            winc_ms: Some(1_000),
            binc_ms: Some(0),
            ..GoParams::default()
        }
    }

    #[test]
    fn movetime_wins_over_clock() {
        let position = Position::new_game();
        let go = GoParams {
            movetime_ms: Some(250),
            ..params()
        };
        assert_eq!(
            resolve_move_time(&position, &go, TimeManagementStrategy::Adaptive),
            Some(250)
        );
    }

    #[test]
    fn fraction_uses_side_to_move_clock() {
        let white = Position::new_game();
        let black = Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .expect("FEN should parse");
        let go = params();
        assert_eq!(
            resolve_move_time(&white, &go, TimeManagementStrategy::Fraction20),
            Some(3_000)
        );
        assert_eq!(
            resolve_move_time(&black, &go, TimeManagementStrategy::Fraction20),
            Some(1_500)
        );
    }

    #[test]
    fn adaptive_budget_stays_within_bounds() {
        let position = Position::new_game();
        let budget = resolve_move_time(&position, &params(), TimeManagementStrategy::Adaptive)
            .expect("clock given");
        // (60000 - 2400) / 40 + 750
        assert_eq!(budget, 2_190);
        assert!(budget <= 15_000);

        let nearly_flagged = GoParams {
            wtime_ms: Some(40),
            ..GoParams::default()
        };
        let tiny = resolve_move_time(&position, &nearly_flagged, TimeManagementStrategy::Adaptive)
            .expect("clock given");
        assert!(tiny >= 1 && tiny <= 10);
    }

    #[test]
    fn infinite_or_missing_clock_has_no_deadline() {
        let position = Position::new_game();
        let infinite = GoParams {
            infinite: true,
            ..params()
        };
        assert_eq!(
            resolve_move_time(&position, &infinite, TimeManagementStrategy::Adaptive),
            None
        );
        assert_eq!(
            resolve_move_time(&position, &GoParams::default(), TimeManagementStrategy::Adaptive),
            None
        );
        assert!(!MoveTimer::start(None).expired());
        assert!(MoveTimer::start(Some(0)).expired());
    }
}
