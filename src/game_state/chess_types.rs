//! Core value types shared by every subsystem.
//!
//! Squares are numbered `1..=64` (`a1 == 1`, `h1 == 8`, `h8 == 64`) with `0`
//! reserved as the invalid sentinel, so the board array carries one unused
//! slot at index zero.

/// Board square (`1..=64`, `0` = no square).
pub type Square = u8;

/// Invalid-square sentinel.
pub const NO_SQUARE: Square = 0;

pub const A1: Square = 1;
pub const B1: Square = 2;
pub const C1: Square = 3;
pub const D1: Square = 4;
pub const E1: Square = 5;
pub const F1: Square = 6;
pub const G1: Square = 7;
pub const H1: Square = 8;
pub const A8: Square = 57;
pub const B8: Square = 58;
pub const C8: Square = 59;
pub const D8: Square = 60;
pub const E8: Square = 61;
pub const F8: Square = 62;
pub const G8: Square = 63;
pub const H8: Square = 64;

/// Rank of a square, `1..=8`.
#[inline]
pub const fn rank_of(square: Square) -> u8 {
    (square - 1) / 8 + 1
}

/// File of a square, `1..=8` (`a == 1`).
#[inline]
pub const fn file_of(square: Square) -> u8 {
    (square - 1) % 8 + 1
}

/// Square from a 1-based file and rank.
#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    (rank - 1) * 8 + file
}

#[inline]
pub const fn is_valid_square(square: Square) -> bool {
    square >= 1 && square <= 64
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `+1` for White, `-1` for Black.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Piece kind (color is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Relative material value in centipawns. The king is priceless and counts
    /// as zero so it never skews material sums or capture ordering.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 320,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

/// A colored piece. Empty squares are `None` on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let lower = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => lower.to_ascii_uppercase(),
            Color::Black => lower,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }
}

/// Castling-rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0b1111;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_file_follow_one_based_numbering() {
        assert_eq!(rank_of(A1), 1);
        assert_eq!(file_of(A1), 1);
        assert_eq!(rank_of(H1), 1);
        assert_eq!(file_of(H1), 8);
        assert_eq!(rank_of(E8), 8);
        assert_eq!(file_of(E8), 5);
        assert_eq!(make_square(5, 1), E1);
        assert_eq!(make_square(8, 8), H8);
    }

    #[test]
    fn fen_chars_round_trip() {
        for ch in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_fen_char(ch).expect("valid piece letter");
            assert_eq!(piece.fen_char(), ch);
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }
}
