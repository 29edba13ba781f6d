//! Move representation: origin, destination and a special-move flag.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square, NO_SQUARE};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    #[default]
    NoFlag,
    DoublePawnPush,
    Castle,
    EnPassantCapture,
    PromoteQueen,
    PromoteKnight,
    PromoteRook,
    PromoteBishop,
}

/// Promotion flags in generation order.
pub const PROMOTION_FLAGS: [MoveFlag; 4] = [
    MoveFlag::PromoteQueen,
    MoveFlag::PromoteKnight,
    MoveFlag::PromoteRook,
    MoveFlag::PromoteBishop,
];

impl MoveFlag {
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    pub fn from_promotion_char(ch: char) -> Option<Self> {
        match ch {
            'q' => Some(MoveFlag::PromoteQueen),
            'n' => Some(MoveFlag::PromoteKnight),
            'r' => Some(MoveFlag::PromoteRook),
            'b' => Some(MoveFlag::PromoteBishop),
            _ => None,
        }
    }

    pub const fn promotion_char(self) -> Option<char> {
        match self {
            MoveFlag::PromoteQueen => Some('q'),
            MoveFlag::PromoteKnight => Some('n'),
            MoveFlag::PromoteRook => Some('r'),
            MoveFlag::PromoteBishop => Some('b'),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub flag: MoveFlag,
}

impl Move {
    /// Placeholder used for "no move" in UCI output and for unused list slots.
    pub const NULL: Move = Move {
        from: NO_SQUARE,
        to: NO_SQUARE,
        flag: MoveFlag::NoFlag,
    };

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self { from, to, flag }
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::NoFlag)
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.from == NO_SQUARE
    }
}

/// UCI long algebraic form, e.g. `e2e4` or `e7e8q`; the null move is `0000`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Ok(from), Ok(to)) = (square_to_algebraic(self.from), square_to_algebraic(self.to))
        else {
            return f.write_str("0000");
        };
        f.write_str(&from)?;
        f.write_str(&to)?;
        if let Some(ch) = self.flag.promotion_char() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveFlag};

    #[test]
    fn display_uses_uci_long_algebraic() {
        assert_eq!(Move::quiet(13, 29).to_string(), "e2e4");
        assert_eq!(Move::new(53, 61, MoveFlag::PromoteQueen).to_string(), "e7e8q");
        assert_eq!(Move::new(50, 57, MoveFlag::PromoteKnight).to_string(), "b7a8n");
        assert_eq!(Move::NULL.to_string(), "0000");
    }
}
