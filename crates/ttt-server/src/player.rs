//! Players: an authenticated identity plus the connection it owns.

use ttt_core::Marker;

use crate::connection::Connection;
use crate::login::LoginGuard;

/// A logged-in client that typed `play` and waits to be paired.
#[derive(Debug)]
pub struct QueuedPlayer {
    pub login: LoginGuard,
    pub conn: Connection,
}

impl QueuedPlayer {
    pub fn new(login: LoginGuard, conn: Connection) -> Self {
        QueuedPlayer { login, conn }
    }

    pub fn name(&self) -> &str {
        self.login.name()
    }

    /// Assign a marker; the player is now part of a game.
    pub fn seat(self, marker: Marker) -> Player {
        Player {
            login: self.login,
            conn: self.conn,
            marker,
        }
    }
}

/// One side of a running game.
#[derive(Debug)]
pub struct Player {
    login: LoginGuard,
    pub conn: Connection,
    pub marker: Marker,
}

impl Player {
    pub fn name(&self) -> &str {
        self.login.name()
    }

    /// Close the connection. The identity stays claimed until the
    /// returned guard is dropped.
    pub async fn close(self) -> LoginGuard {
        self.conn.close().await;
        self.login
    }
}
