//! Compile-time lookup tables for move generation.
//!
//! Everything here is evaluated by `const fn` during compilation, so the
//! tables are immutable and shared freely between threads.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{Color, Square};

/// Square offsets for the 8 ray directions: N, S, E, W, NW, SE, NE, SW.
/// Rook directions occupy indices `0..4`, bishop directions `4..8`.
pub const DIRECTION_OFFSETS: [i8; 8] = [8, -8, 1, -1, 7, -7, 9, -9];

pub const ROOK_DIRECTIONS: std::ops::Range<usize> = 0..4;
pub const BISHOP_DIRECTIONS: std::ops::Range<usize> = 4..8;
pub const QUEEN_DIRECTIONS: std::ops::Range<usize> = 0..8;

#[inline]
pub const fn is_orthogonal_direction(dir: usize) -> bool {
    dir < 4
}

/// Steps from a square to the board edge in each direction.
pub const SQUARES_TO_EDGE: [[u8; 8]; 65] = build_squares_to_edge();

/// Knight offsets; bit `i` of a boundary pattern enables `KNIGHT_OFFSETS[i]`.
pub const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

/// Which knight offsets stay on the board from each square.
pub const KNIGHT_ALLOWED: [u8; 65] = build_knight_allowed();

pub const KNIGHT_TARGETS: [Bitboard; 65] = build_knight_targets();
pub const KING_TARGETS: [Bitboard; 65] = build_king_targets();

/// Diagonal capture squares of a pawn, indexed by `[color][square]`.
pub const PAWN_ATTACKS: [[Bitboard; 65]; 2] = build_pawn_attacks();

#[inline]
pub const fn step(square: Square, dir: usize, distance: u8) -> Square {
    (square as i8 + DIRECTION_OFFSETS[dir] * distance as i8) as Square
}

#[inline]
pub const fn knight_targets(square: Square) -> Bitboard {
    KNIGHT_TARGETS[square as usize]
}

#[inline]
pub const fn king_targets(square: Square) -> Bitboard {
    KING_TARGETS[square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][square as usize]
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

const fn build_squares_to_edge() -> [[u8; 8]; 65] {
    let mut table = [[0u8; 8]; 65];
    let mut sq = 1usize;
    while sq <= 64 {
        let rank = ((sq - 1) / 8 + 1) as u8;
        let file = ((sq - 1) % 8 + 1) as u8;
        let up = 8 - rank;
        let down = rank - 1;
        let left = file - 1;
        let right = 8 - file;

        table[sq] = [
            up,
            down,
            right,
            left,
            min(up, left),
            min(down, right),
            min(up, right),
            min(down, left),
        ];
        sq += 1;
    }
    table
}

const fn build_knight_allowed() -> [u8; 65] {
    let mut table = [0u8; 65];
    let mut sq = 1usize;
    while sq <= 64 {
        let rank = (sq - 1) / 8 + 1;
        let file = (sq - 1) % 8 + 1;
        let mut allowed: u8 = 0b1111_1111;
        allowed &= match rank {
            1 => 0b1111_0000,
            2 => 0b1111_1100,
            7 => 0b0011_1111,
            8 => 0b0000_1111,
            _ => 0b1111_1111,
        };
        allowed &= match file {
            1 => 0b1010_1010,
            2 => 0b1110_1011,
            7 => 0b1101_0111,
            8 => 0b0101_0101,
            _ => 0b1111_1111,
        };
        table[sq] = allowed;
        sq += 1;
    }
    table
}

const fn build_knight_targets() -> [Bitboard; 65] {
    let mut table = [Bitboard::EMPTY; 65];
    let mut sq = 1usize;
    while sq <= 64 {
        let allowed = KNIGHT_ALLOWED[sq];
        let mut bits = 0u64;
        let mut i = 0;
        while i < 8 {
            if (allowed >> i) & 1 == 1 {
                let to = sq as i8 + KNIGHT_OFFSETS[i];
                bits |= 1u64 << (to - 1);
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

const fn build_king_targets() -> [Bitboard; 65] {
    let mut table = [Bitboard::EMPTY; 65];
    let mut sq = 1usize;
    while sq <= 64 {
        let mut bits = 0u64;
        let mut dir = 0;
        while dir < 8 {
            if SQUARES_TO_EDGE[sq][dir] >= 1 {
                let to = sq as i8 + DIRECTION_OFFSETS[dir];
                bits |= 1u64 << (to - 1);
            }
            dir += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

const fn build_pawn_attacks() -> [[Bitboard; 65]; 2] {
    let mut table = [[Bitboard::EMPTY; 65]; 2];
    let mut sq = 1usize;
    while sq <= 64 {
        let rank = (sq - 1) / 8 + 1;
        let file = (sq - 1) % 8 + 1;

        let mut white = 0u64;
        if rank < 8 {
            if file > 1 {
                white |= 1u64 << (sq + 7 - 1);
            }
            if file < 8 {
                white |= 1u64 << (sq + 9 - 1);
            }
        }

        let mut black = 0u64;
        if rank > 1 {
            if file > 1 {
                black |= 1u64 << (sq - 9 - 1);
            }
            if file < 8 {
                black |= 1u64 << (sq - 7 - 1);
            }
        }

        table[0][sq] = Bitboard(white);
        table[1][sq] = Bitboard(black);
        sq += 1;
    }
    table
}
