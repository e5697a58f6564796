//! Per-game spectator set and broadcast.
//!
//! Each spectator is represented by the sending half of a text channel;
//! the spectator's own session task drains it onto the socket. That way:
//! - the lock is held only to snapshot or mutate the set, never across I/O,
//! - a send to a spectator that has just gone away is a harmless `Err`
//!   that removes that one entry,
//! - clearing the set (game over) drops the senders, which tells every
//!   spectator session to flush what it has and hang up.
//!
//! Once `disconnect_all` ran the set is closed and refuses new members,
//! which settles the race between listing a game and joining it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::types::{ClientId, SpectatorTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpectateError {
    #[error("the game has already finished")]
    GameFinished,
}

#[derive(Debug, Default)]
struct Members {
    senders: HashMap<ClientId, SpectatorTx>,
    closed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SpectatorSet {
    members: Arc<Mutex<Members>>,
}

impl SpectatorSet {
    pub fn new() -> Self {
        SpectatorSet::default()
    }

    pub fn add(&self, id: ClientId, tx: SpectatorTx) -> Result<(), SpectateError> {
        let mut members = self.members();
        if members.closed {
            return Err(SpectateError::GameFinished);
        }
        members.senders.insert(id, tx);
        Ok(())
    }

    /// Returns `true` if `id` was still registered.
    pub fn remove(&self, id: ClientId) -> bool {
        self.members().senders.remove(&id).is_some()
    }

    /// Deliver `text` to every current spectator.
    ///
    /// Returns how many spectators accepted it. Spectators whose channel
    /// is gone are removed; nobody else is affected.
    pub fn broadcast(&self, text: &str) -> usize {
        // Snapshot of current spectators to minimize lock hold time.
        let current: Vec<(ClientId, SpectatorTx)> = self
            .members()
            .senders
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut delivered = 0;
        for (id, tx) in current {
            if tx.send(text.to_string()).is_ok() {
                delivered += 1;
            } else {
                debug!(client = %id, "dropping unreachable spectator");
                self.remove(id);
            }
        }
        delivered
    }

    /// Close the set and release every spectator.
    pub fn disconnect_all(&self) -> usize {
        let mut members = self.members();
        members.closed = true;
        let count = members.senders.len();
        members.senders.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.members().senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn members(&self) -> MutexGuard<'_, Members> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn failed_spectator_does_not_stop_the_others() {
        let set = SpectatorSet::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        set.add(ClientId(1), tx1).unwrap();
        set.add(ClientId(2), tx2).unwrap();
        set.add(ClientId(3), tx3).unwrap();

        drop(rx2);
        assert_eq!(set.broadcast("board"), 2);
        assert_eq!(set.len(), 2);

        assert_eq!(rx1.try_recv().unwrap(), "board");
        assert_eq!(rx3.try_recv().unwrap(), "board");
    }

    #[test]
    fn closed_set_refuses_late_spectators() {
        let set = SpectatorSet::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        set.add(ClientId(1), tx).unwrap();

        set.broadcast("Game Over");
        assert_eq!(set.disconnect_all(), 1);

        // Already-queued text is still delivered, then the channel ends.
        assert_eq!(rx.try_recv().unwrap(), "Game Over");
        assert!(matches!(rx.try_recv(), Err(mpsc::error::TryRecvError::Disconnected)));

        let (late, _late_rx) = mpsc::unbounded_channel();
        assert_eq!(set.add(ClientId(2), late), Err(SpectateError::GameFinished));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let set = SpectatorSet::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        set.add(ClientId(7), tx).unwrap();
        assert!(set.remove(ClientId(7)));
        assert!(!set.remove(ClientId(7)));
    }
}
