//! Shared types for the game server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected clients
//! - `GameId`: the random, unique id of one game
//! - channel aliases between sessions, the matchmaker, games and the
//!   results reporter

use std::fmt;

use tokio::sync::mpsc;
use ttt_core::GameResult;
use uuid::Uuid;

use crate::player::QueuedPlayer;

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a game, generated fresh (UUID v4) per game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(String);

impl GameId {
    pub fn generate() -> Self {
        GameId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        GameId(s.trim().to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text pushed to one spectator's connection.
pub type SpectatorTx = mpsc::UnboundedSender<String>;
pub type SpectatorRx = mpsc::UnboundedReceiver<String>;

/// Sessions → matchmaker.
pub type QueueTx = mpsc::UnboundedSender<QueuedPlayer>;
pub type QueueRx = mpsc::UnboundedReceiver<QueuedPlayer>;

/// Games → results reporter.
pub type ResultTx = mpsc::UnboundedSender<GameResult>;
pub type ResultRx = mpsc::UnboundedReceiver<GameResult>;
