//! Server-wide registry of running games.
//!
//! The registry only holds lookup handles: the id, the two identities
//! and the game's [`SpectatorSet`]. Board and turn state stay inside
//! the game task. One lock guards the whole map; it is never held
//! while a spectator lock is taken.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::spectators::SpectatorSet;
use crate::types::GameId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("game {0} is already registered")]
    Duplicate(GameId),
}

/// Non-owning view of a running game.
#[derive(Debug, Clone)]
pub struct GameHandle {
    pub id: GameId,
    /// Plays `X`.
    pub first: String,
    /// Plays `O`.
    pub second: String,
    pub spectators: SpectatorSet,
}

#[derive(Clone, Debug, Default)]
pub struct GameRegistry {
    games: Arc<RwLock<HashMap<GameId, GameHandle>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        GameRegistry::default()
    }

    /// Register a new game. Never overwrites an existing id.
    pub async fn register(&self, handle: GameHandle) -> Result<(), RegistryError> {
        let mut guard = self.games.write().await;
        if guard.contains_key(&handle.id) {
            return Err(RegistryError::Duplicate(handle.id));
        }
        guard.insert(handle.id.clone(), handle);
        Ok(())
    }

    pub async fn lookup(&self, id: &GameId) -> Option<GameHandle> {
        self.games.read().await.get(id).cloned()
    }

    /// Remove a finished game. Removing an unknown id is a no-op.
    ///
    /// Returns `true` if the game was still registered.
    pub async fn remove(&self, id: &GameId) -> bool {
        self.games.write().await.remove(id).is_some()
    }

    /// Point-in-time listing, ordered by id.
    pub async fn snapshot(&self) -> Vec<GameHandle> {
        let mut games: Vec<GameHandle> = self.games.read().await.values().cloned().collect();
        games.sort_by(|a, b| a.id.cmp(&b.id));
        games
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}
