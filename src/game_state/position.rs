//! Core incremental board state representation.
//!
//! `Position` keeps a square-indexed board array next to per-piece
//! bitboards. The bitboards are built once at construction and afterwards
//! only touched through `put_piece`/`remove_piece`/`move_piece`, so the two
//! views never drift apart.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_rules::{en_passant_target_rank, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // --- Board representation ---
    // Index 0 is the invalid square and always empty.
    pub board: [Option<Piece>; 65],
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    pub king_squares: [Square; 2],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// File (`1..=8`) of a pawn that just double-pushed, `0` when none.
    pub ep_file: u8,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub ply: u16,

    // --- Make/unmake stack ---
    pub undo_stack: Vec<UndoState>,
}

impl Position {
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Builds a position from a filled board array, deriving bitboards and
    /// king squares from it. Missing kings leave their cache at `NO_SQUARE`.
    pub fn from_parts(
        board: [Option<Piece>; 65],
        side_to_move: Color,
        castling_rights: CastlingRights,
        ep_file: u8,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut position = Self {
            board: [None; 65],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy_by_color: [Bitboard::EMPTY; 2],
            occupancy_all: Bitboard::EMPTY,
            king_squares: [NO_SQUARE; 2],
            side_to_move,
            castling_rights,
            ep_file,
            halfmove_clock,
            fullmove_number,
            ply: 0,
            undo_stack: Vec::new(),
        };

        for square in 1..=64u8 {
            if let Some(piece) = board[square as usize] {
                position.put_piece(square, piece);
            }
        }

        position
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// En-passant target square for the side to move, if any.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        if self.ep_file == 0 {
            None
        } else {
            Some(make_square(
                self.ep_file,
                en_passant_target_rank(self.side_to_move),
            ))
        }
    }

    #[inline]
    pub fn rooks_and_queens(&self, color: Color) -> Bitboard {
        self.pieces_of(color, PieceKind::Rook) | self.pieces_of(color, PieceKind::Queen)
    }

    #[inline]
    pub fn bishops_and_queens(&self, color: Color) -> Bitboard {
        self.pieces_of(color, PieceKind::Bishop) | self.pieces_of(color, PieceKind::Queen)
    }

    #[inline]
    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.board[square as usize].is_none(), "square {square} already occupied");
        let mask = Bitboard::from_square(square);
        self.board[square as usize] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = square;
        }
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, square: Square) -> Piece {
        let piece = self.board[square as usize]
            .take()
            .expect("remove_piece on an empty square");
        let mask = Bitboard::from_square(square);
        self.pieces[piece.color.index()][piece.kind.index()] ^= mask;
        self.occupancy_by_color[piece.color.index()] ^= mask;
        self.occupancy_all ^= mask;
        piece
    }

    /// Relocates a piece with one XOR of the from/to mask per bitboard.
    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.board[from as usize]
            .take()
            .expect("move_piece from an empty square");
        debug_assert!(self.board[to as usize].is_none(), "move_piece onto an occupied square");
        let mask = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.board[to as usize] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] ^= mask;
        self.occupancy_by_color[piece.color.index()] ^= mask;
        self.occupancy_all ^= mask;
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = to;
        }
    }

    /// True when every bitboard, occupancy cache and king square agrees
    /// with the board array.
    pub fn is_consistent(&self) -> bool {
        let rebuilt = Self::from_parts(
            self.board,
            self.side_to_move,
            self.castling_rights,
            self.ep_file,
            self.halfmove_clock,
            self.fullmove_number,
        );
        rebuilt.pieces == self.pieces
            && rebuilt.occupancy_by_color == self.occupancy_by_color
            && rebuilt.occupancy_all == self.occupancy_all
            && rebuilt.king_squares == self.king_squares
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_has_consistent_caches() {
        let position = Position::new_game();
        assert!(position.is_consistent());
        assert_eq!(position.king_square(Color::White), E1);
        assert_eq!(position.king_square(Color::Black), E8);
        assert_eq!(position.occupancy_all.count(), 32);
        assert_eq!(position.pieces_of(Color::White, PieceKind::Pawn).count(), 8);
        assert_eq!(position.castling_rights, CASTLE_ALL);
        assert_eq!(position.ep_square(), None);
    }

    #[test]
    fn incremental_updates_track_board() {
        let mut position = Position::new_game();
        let e2 = make_square(5, 2);
        let e4 = make_square(5, 4);
        position.move_piece(e2, e4);
        assert!(position.is_consistent());
        assert_eq!(position.piece_at(e2), None);
        assert_eq!(position.piece_at(e4), Some(Piece::new(Color::White, PieceKind::Pawn)));

        let captured = position.remove_piece(make_square(4, 8));
        assert_eq!(captured, Piece::new(Color::Black, PieceKind::Queen));
        assert!(position.is_consistent());
    }

    #[test]
    fn ep_square_follows_side_to_move() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .expect("FEN should parse");
        assert_eq!(position.ep_file, 4);
        assert_eq!(position.ep_square(), Some(make_square(4, 6)));
    }
}
