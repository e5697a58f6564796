//! ttt-core
//!
//! Pure tic-tac-toe logic:
//! - markers and cells
//! - the 3x3 board with win / draw detection
//! - move parsing (`A1`..`C3`)
//! - the single-game turn machine
//! - result and statistics records handed to persistence

pub mod marker;
pub mod board;
pub mod moves;
pub mod game_state;
pub mod result;
pub mod stats;
pub mod error;

pub use marker::{Cell, Marker};
pub use board::{Board, LINES};
pub use moves::Move;
pub use game_state::{GameState, Status};
pub use result::GameResult;
pub use stats::{PlayerStats, RankedPlayer};
pub use error::MoveError;
