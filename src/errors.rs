//! Error types for the boundaries of the rules engine.
//!
//! Rule violations inside the game state machine are not errors: an illegal
//! activation simply leaves the board untouched. These types cover the text
//! and process boundaries where input can be malformed.

use thiserror::Error;

/// Malformed square or move text such as `e9` or `e2e`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("square index out of bounds: ({row}, {col})")]
    OutOfBounds { row: i8, col: i8 },
}

/// Malformed position strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("invalid board layout: {0}")]
    InvalidPlacement(String),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidClock(String),
}

/// Failures talking to an opponent engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine closed its output before answering")]
    Disconnected,

    #[error("unexpected engine reply: {0}")]
    Protocol(String),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("background search thread terminated without a result")]
    SearchAborted,
}

/// Relay messages that cannot be decoded.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed relay message: {0}")]
    Json(#[from] serde_json::Error),
}
