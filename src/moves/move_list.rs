//! Fixed-capacity move container.

use std::ops::{Deref, DerefMut};

use crate::moves::chess_move::Move;

/// Room for the 218-move maximum of any reachable position, with headroom.
pub const MAX_MOVES: usize = 256;

/// Ordered, bounded move sequence; insertion order is generation order.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[inline]
    pub const fn new() -> Self {
        Self {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    #[inline]
    fn deref(&self) -> &[Move] {
        self.as_slice()
    }
}

impl DerefMut for MoveList {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Move] {
        self.as_mut_slice()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        for mv in iter {
            self.push(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MoveList;
    use crate::moves::chess_move::Move;

    #[test]
    fn push_keeps_insertion_order() {
        let mut list = MoveList::new();
        list.push(Move::quiet(1, 2));
        assert_eq!(list.len(), 1);

        for i in 0..100u8 {
            list.push(Move::quiet(1, (i % 63) + 2));
        }
        assert_eq!(list.len(), 101);
        assert_eq!(list[0], Move::quiet(1, 2));
        assert_eq!(list[100], Move::quiet(1, (99 % 63) + 2));
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = MoveList::new();
        list.extend([Move::quiet(9, 17), Move::quiet(10, 18)]);
        assert!(!list.is_empty());
        list.clear();
        assert!(list.is_empty());
    }
}
