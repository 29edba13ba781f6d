//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration runs a full fixed-depth search; leaves hand off to a
//! capture-only quiescence search. Limits (stop flag, deadline, node cap)
//! are polled at node entry, so a cancelled iteration unwinds through its
//! pending unmakes and its partial result is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engines::time_management::MoveTimer;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::{is_capture, order_moves};

pub const MAX_PLY: i32 = 128;
/// Scores at or beyond this magnitude announce a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY;
const INFINITY: i32 = MATE_SCORE + 1;

/// Deadline and stop flag are polled once per this many nodes.
const CHECK_INTERVAL: u64 = 2048;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub max_nodes: Option<u64>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            movetime_ms: None,
            max_nodes: None,
            stop_flag: None,
        }
    }
}

/// Summary of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationInfo {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub best_move: Move,
}

impl IterationInfo {
    pub fn uci_line(&self) -> String {
        format!(
            "info depth {} score {} nodes {} time {} pv {}",
            self.depth,
            uci_score(self.score),
            self.nodes,
            self.elapsed_ms,
            self.best_move
        )
    }
}

/// `cp <n>` or `mate <moves>` as UCI expects.
pub fn uci_score(score: i32) -> String {
    if score >= MATE_THRESHOLD {
        format!("mate {}", (MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        format!("mate -{}", (MATE_SCORE + score) / 2)
    } else {
        format!("cp {score}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    /// True when the last attempted iteration was cut short.
    pub aborted: bool,
    pub iterations: Vec<IterationInfo>,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    position: &Position,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult {
    iterative_deepening_search_with(position, scorer, config, |_| {})
}

/// Like [`iterative_deepening_search`], reporting each completed iteration
/// through `on_iteration` as soon as it finishes.
pub fn iterative_deepening_search_with<S, F>(
    position: &Position,
    scorer: &S,
    config: &SearchConfig,
    mut on_iteration: F,
) -> SearchResult
where
    S: BoardScorer,
    F: FnMut(&IterationInfo),
{
    let mut searcher = Searcher {
        scorer,
        timer: MoveTimer::start(config.movetime_ms),
        stop_flag: config.stop_flag.as_deref(),
        max_nodes: config.max_nodes.filter(|n| *n > 0),
        nodes: 0,
        aborted: false,
    };
    let mut root = position.clone();
    let mut result = SearchResult::default();

    let legal = generate_legal_moves(&root);
    if legal.moves.is_empty() {
        result.best_score = if legal.in_check() { -MATE_SCORE } else { 0 };
        return result;
    }

    // Fallback if even the first iteration is cancelled.
    let mut root_moves = legal.moves;
    order_moves(&root, &mut root_moves);
    result.best_move = Some(root_moves[0]);

    for depth in 1..=config.max_depth.max(1) {
        if searcher.limits_reached() {
            result.aborted = true;
            break;
        }

        let Some((best_move, best_score)) =
            searcher.search_root(&mut root, &mut root_moves, depth)
        else {
            result.aborted = true;
            break;
        };

        result.best_move = Some(best_move);
        result.best_score = best_score;
        result.reached_depth = depth;

        let info = IterationInfo {
            depth,
            score: best_score,
            nodes: searcher.nodes,
            elapsed_ms: searcher.timer.elapsed_ms(),
            best_move,
        };
        on_iteration(&info);
        result.iterations.push(info);

        if best_score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    debug_assert_eq!(&root, position, "search left the root position modified");

    result.nodes = searcher.nodes;
    result.elapsed_ms = searcher.timer.elapsed_ms();
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result
}

struct Searcher<'a, S> {
    scorer: &'a S,
    timer: MoveTimer,
    stop_flag: Option<&'a AtomicBool>,
    max_nodes: Option<u64>,
    nodes: u64,
    aborted: bool,
}

impl<S: BoardScorer> Searcher<'_, S> {
    fn limits_reached(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let out_of_nodes = self.max_nodes.is_some_and(|cap| self.nodes >= cap);
        let stopped = self
            .stop_flag
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        self.aborted = out_of_nodes || stopped || self.timer.expired();
        self.aborted
    }

    /// Counts a node; `None` once any limit has been hit.
    #[inline]
    fn visit(&mut self) -> Option<()> {
        self.nodes += 1;
        let at_checkpoint = self.nodes % CHECK_INTERVAL == 0;
        let over_cap = self.max_nodes.is_some_and(|cap| self.nodes > cap);
        if self.aborted || ((at_checkpoint || over_cap) && self.limits_reached()) {
            None
        } else {
            Some(())
        }
    }

    /// Searches every root move at `depth`. On success the root list is
    /// reordered so the best move leads the next iteration.
    fn search_root(
        &mut self,
        position: &mut Position,
        root_moves: &mut MoveList,
        depth: u8,
    ) -> Option<(Move, i32)> {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_index = 0;
        let mut best_score = -INFINITY;

        for (index, &mv) in root_moves.iter().enumerate() {
            make_move(position, mv);
            let child = self.negamax(position, depth - 1, -beta, -alpha, 1);
            unmake_move(position, mv);
            let score = -child?;

            if score > best_score {
                best_score = score;
                best_index = index;
            }
            if score > alpha {
                alpha = score;
            }
            if score >= MATE_THRESHOLD {
                break;
            }
        }

        let best_move = root_moves[best_index];
        root_moves.as_mut_slice()[..=best_index].rotate_right(1);
        Some((best_move, best_score))
    }

    fn negamax(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> Option<i32> {
        if depth == 0 {
            return self.quiescence(position, alpha, beta, ply);
        }
        self.visit()?;

        let legal = generate_legal_moves(position);
        if legal.moves.is_empty() {
            return Some(terminal_score(legal.in_check(), ply));
        }

        let mut moves = legal.moves;
        order_moves(position, &mut moves);

        let mut best = -INFINITY;
        for &mv in moves.iter() {
            make_move(position, mv);
            let child = self.negamax(position, depth - 1, -beta, -alpha, ply + 1);
            unmake_move(position, mv);
            let score = -child?;

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        Some(best)
    }

    fn quiescence(
        &mut self,
        position: &mut Position,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> Option<i32> {
        self.visit()?;

        let legal = generate_legal_moves(position);
        if legal.moves.is_empty() {
            return Some(terminal_score(legal.in_check(), ply));
        }

        let stand_pat = self.scorer.score(position);
        if stand_pat >= beta || ply >= MAX_PLY {
            return Some(stand_pat);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = MoveList::new();
        captures.extend(legal.moves.iter().copied().filter(|&mv| is_capture(position, mv)));
        order_moves(position, &mut captures);

        for &mv in captures.iter() {
            make_move(position, mv);
            let child = self.quiescence(position, -beta, -alpha, ply + 1);
            unmake_move(position, mv);
            let score = -child?;

            if score >= beta {
                return Some(score);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Some(alpha)
    }
}

/// Mated: lose, preferring the longest resistance. No moves otherwise: draw.
#[inline]
fn terminal_score(in_check: bool, ply: i32) -> i32 {
    if in_check {
        -MATE_SCORE + ply
    } else {
        0
    }
}
