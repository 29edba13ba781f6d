//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the 1-based
//! square numbers used by the board array, for the FEN and UCI layers.

use crate::game_state::chess_errors::ChessError;
use crate::game_state::chess_types::{is_valid_square, make_square, Square};

/// Convert algebraic notation (for example: "e4") to a square number.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidMove(format!(
            "invalid algebraic square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidMove(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidMove(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    Ok(make_square(file - b'a' + 1, rank - b'1' + 1))
}

/// Convert a square number (`1..=64`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessError> {
    if !is_valid_square(square) {
        return Err(ChessError::InvalidMove(format!(
            "square out of bounds: {square}"
        )));
    }

    let file_char = char::from(b'a' + (square - 1) % 8);
    let rank_char = char::from(b'1' + (square - 1) / 8);

    Ok(format!("{file_char}{rank_char}"))
}
