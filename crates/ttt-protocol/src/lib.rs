//! ttt-protocol
//!
//! The human-readable line protocol spoken over the TCP stream.
//!
//! - [`commands`] : parsing of menu input lines
//! - [`board_text`] : ASCII rendering of the board
//! - [`text`] : every prompt and status line the server writes
//!
//! Server lines end in `\r\n`; prompts end without a delimiter and the
//! client answers with one newline-terminated line.

pub mod commands;
pub mod board_text;
pub mod text;

pub use commands::{LobbyCommand, MainCommand};
pub use board_text::render_board;

/// Line terminator for everything the server writes.
pub const CRLF: &str = "\r\n";
