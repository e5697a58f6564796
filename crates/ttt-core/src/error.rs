//! Error types for the core game logic.
//!
//! Every variant is a recoverable protocol error: the caller re-prompts
//! the same player and neither the board nor the turn changes.

use thiserror::Error;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move must be 2 characters (e.g., A1)")]
    Length,

    #[error("row out of bounds")]
    RowOutOfBounds,

    #[error("column out of bounds")]
    ColumnOutOfBounds,

    #[error("cell already occupied")]
    Occupied,

    #[error("the game is already over")]
    GameOver,
}
