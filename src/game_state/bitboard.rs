//! 64-bit square sets.
//!
//! Bit `sq - 1` represents square `sq`, matching the 1-based square numbering
//! used by the board array.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    #[inline]
    pub const fn from_square(square: Square) -> Self {
        Bitboard(1u64 << (square - 1))
    }

    pub fn from_squares(squares: &[Square]) -> Self {
        let mut bb = Bitboard::EMPTY;
        for &sq in squares {
            bb.set(sq);
        }
        bb
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0 |= 1u64 << (square - 1);
    }

    #[inline]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !(1u64 << (square - 1));
    }

    #[inline]
    pub const fn is_set(self, square: Square) -> bool {
        self.0 & (1u64 << (square - 1)) != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Removes and returns the lowest set square.
    ///
    /// Calling this on an empty bitboard is a programming error.
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        debug_assert!(self.0 != 0, "pop_lsb on an empty bitboard");
        let square = self.0.trailing_zeros() as Square + 1;
        self.0 &= self.0.wrapping_sub(1);
        square
    }

    /// Iterates the set squares in ascending order.
    #[inline]
    pub fn squares(self) -> Squares {
        Squares(self)
    }
}

pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// 8x8 diagnostic view, rank 8 at the top, `x` for set squares.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=8u8).rev() {
            for file in 1..=8u8 {
                let sq = (rank - 1) * 8 + file;
                let mark = if self.is_set(sq) { 'x' } else { '.' };
                if file < 8 {
                    write!(f, "{mark} ")?;
                } else {
                    writeln!(f, "{mark}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;

    #[test]
    fn set_and_clear_every_square() {
        let mut bb = Bitboard::EMPTY;
        for sq in 1..=64u8 {
            bb.set(sq);
            assert!(bb.is_set(sq), "bit should be set: {sq}");
            bb.clear(sq);
            assert!(!bb.is_set(sq), "bit should be cleared: {sq}");
        }
        assert_eq!(bb.count(), 0);

        let low = Bitboard(0b1111);
        assert_eq!(low.count(), 4);
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!(Bitboard::FULL.count(), 64);
    }

    #[test]
    fn pop_lsb_extracts_in_ascending_order() {
        let mut bb = Bitboard::from_squares(&[64, 3, 17]);
        assert_eq!(bb.pop_lsb(), 3);
        assert_eq!(bb.pop_lsb(), 17);
        assert_eq!(bb.pop_lsb(), 64);
        assert!(bb.is_empty());
    }

    #[test]
    fn squares_iterator_visits_each_set_bit() {
        let bb = Bitboard::from_squares(&[1, 8, 57, 64]);
        let visited: Vec<u8> = bb.squares().collect();
        assert_eq!(visited, vec![1, 8, 57, 64]);
        assert_eq!(bb.count(), 4);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn pop_lsb_on_empty_traps_in_debug_builds() {
        let mut bb = Bitboard::EMPTY;
        bb.pop_lsb();
    }

    #[test]
    fn display_renders_rank_eight_first() {
        let rendered = Bitboard::from_squares(&[1, 64]).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ". . . . . . . x");
        assert_eq!(lines[7], "x . . . . . . .");
    }
}
