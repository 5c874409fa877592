//! Core type definitions for SharedBoard.
//!
//! This crate defines the plain data shared by every layer of the board
//! engine:
//! - Piece identifiers, kinds and colors
//! - Grid squares and the `offboard` sentinel position
//! - The board snapshot that is broadcast to clients and persisted
//! - A monotonic millisecond clock used for id synthesis
//!
//! Nothing here knows about clients, channels or storage.

mod board;
mod ids;
mod piece;
mod position;
mod timestamp;

pub use board::BoardState;
pub use ids::PieceId;
pub use piece::{Color, Piece, PieceKind};
pub use position::{Position, Square, OFFBOARD};
pub use timestamp::{MonotonicMillis, now_millis};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing or checking board types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid position: {0:?}")]
    InvalidPosition(String),

    #[error("unknown piece type: {0:?}")]
    UnknownPieceKind(String),

    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    #[error("piece id must not be empty")]
    EmptyPieceId,

    #[error("duplicate piece id: {0}")]
    DuplicatePieceId(PieceId),

    #[error("square {square} is held by both {first} and {second}")]
    SquareConflict {
        square: Square,
        first: PieceId,
        second: PieceId,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
