//! Leaf-node counting over the legal move tree.
//!
//! Used to validate move generation against published node counts; the
//! search never calls into this module.

use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::{generate_legal_moves, MaskLegalMoveGenerator};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::{Move, MoveFlag};

/// Leaf statistics gathered at the final ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(position: &mut Position, depth: u8) -> u64 {
    perft_with(&MaskLegalMoveGenerator, position, depth)
}

pub fn perft_with<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &mut Position,
    depth: u8,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    let legal = generator.generate_legal_moves(position);
    if depth == 1 {
        return legal.moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in legal.moves.iter() {
        make_move(position, mv);
        nodes += perft_with(generator, position, depth - 1);
        unmake_move(position, mv);
    }
    nodes
}

/// Node count below each root move, in generation order.
pub fn perft_divide(position: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let legal = generate_legal_moves(position);
    let mut out = Vec::with_capacity(legal.moves.len());
    for &mv in legal.moves.iter() {
        make_move(position, mv);
        let nodes = perft(position, depth - 1);
        unmake_move(position, mv);
        out.push((mv, nodes));
    }
    out
}

/// Perft with leaf classification. Slower than `perft` because every leaf
/// is played to test for check and mate.
pub fn perft_counts(position: &mut Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let legal = generate_legal_moves(position);
    let mut total = PerftCounts::default();

    for &mv in legal.moves.iter() {
        if depth == 1 {
            let is_capture =
                position.piece_at(mv.to).is_some() || mv.flag == MoveFlag::EnPassantCapture;
            make_move(position, mv);
            let replies = generate_legal_moves(position);
            unmake_move(position, mv);

            total.nodes += 1;
            total.captures += u64::from(is_capture);
            total.en_passant += u64::from(mv.flag == MoveFlag::EnPassantCapture);
            total.castles += u64::from(mv.flag == MoveFlag::Castle);
            total.promotions += u64::from(mv.flag.is_promotion());
            total.checks += u64::from(replies.in_check());
            total.checkmates += u64::from(replies.in_check() && replies.moves.is_empty());
        } else {
            make_move(position, mv);
            total.merge(perft_counts(position, depth - 1));
            unmake_move(position, mv);
        }
    }

    total
}
