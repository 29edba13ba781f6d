//! Errors raised at the engine's external boundaries.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// FEN text that cannot describe a position.
    #[error("malformed FEN: {0}")]
    MalformedFen(String),
    /// Move text that is not well-formed UCI long algebraic notation.
    #[error("invalid move: {0}")]
    InvalidMove(String),
    /// A well-formed move that the current position does not allow.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("opening book: {0}")]
    OpeningBook(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
