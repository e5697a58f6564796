//! Collaborator contracts for credentials and statistics, plus an
//! in-memory implementation used by the binary and the tests.
//!
//! A database-backed store only has to implement [`AccountStore`] and
//! [`StatsStore`]; the server never looks past these traits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use ttt_core::{GameResult, PlayerStats, RankedPlayer};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("identity {0} already exists")]
    AlreadyExists(String),

    #[error("unknown identity {0}")]
    UnknownIdentity(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Credential collaborator.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn identity_exists(&self, name: &str) -> Result<bool, StoreError>;

    async fn create_identity(&self, name: &str, secret: &str) -> Result<(), StoreError>;

    async fn verify_secret(&self, name: &str, secret: &str) -> Result<bool, StoreError>;
}

/// Statistics collaborator.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Durably record a finished game. Called from the results reporter,
    /// never from a game task.
    async fn record_result(&self, result: &GameResult) -> Result<(), StoreError>;

    async fn player_stats(&self, name: &str) -> Result<PlayerStats, StoreError>;

    /// Best win rate first.
    async fn top_players(&self, limit: usize) -> Result<Vec<RankedPlayer>, StoreError>;
}

#[derive(Debug, Default)]
struct Account {
    secret: String,
    stats: PlayerStats,
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn identity_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.accounts().contains_key(name))
    }

    async fn create_identity(&self, name: &str, secret: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts();
        if accounts.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        accounts.insert(
            name.to_string(),
            Account {
                secret: secret.to_string(),
                stats: PlayerStats::default(),
            },
        );
        Ok(())
    }

    async fn verify_secret(&self, name: &str, secret: &str) -> Result<bool, StoreError> {
        Ok(self
            .accounts()
            .get(name)
            .is_some_and(|account| account.secret == secret))
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn record_result(&self, result: &GameResult) -> Result<(), StoreError> {
        if result.is_void() {
            return Ok(());
        }

        let mut accounts = self.accounts();
        for name in [&result.first, &result.second] {
            let account = accounts
                .get_mut(name.as_str())
                .ok_or_else(|| StoreError::UnknownIdentity(name.clone()))?;
            let stats = &mut account.stats;
            stats.games += 1;
            if result.winner.as_ref() == Some(name) {
                stats.wins += 1;
            } else if result.loser.as_ref() == Some(name) {
                stats.losses += 1;
            } else {
                stats.draws += 1;
            }
        }
        Ok(())
    }

    async fn player_stats(&self, name: &str) -> Result<PlayerStats, StoreError> {
        self.accounts()
            .get(name)
            .map(|account| account.stats)
            .ok_or_else(|| StoreError::UnknownIdentity(name.to_string()))
    }

    async fn top_players(&self, limit: usize) -> Result<Vec<RankedPlayer>, StoreError> {
        let mut ranked: Vec<RankedPlayer> = self
            .accounts()
            .iter()
            .map(|(name, account)| RankedPlayer {
                name: name.clone(),
                win_rate: account.stats.win_rate(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.win_rate
                .total_cmp(&a.win_rate)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(names: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for name in names {
            store.create_identity(name, "pw").await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn credentials() {
        let store = store_with(&["alice"]).await;
        assert!(store.identity_exists("alice").await.unwrap());
        assert!(!store.identity_exists("bob").await.unwrap());
        assert!(store.verify_secret("alice", "pw").await.unwrap());
        assert!(!store.verify_secret("alice", "nope").await.unwrap());
        assert!(!store.verify_secret("bob", "pw").await.unwrap());
        assert!(matches!(
            store.create_identity("alice", "x").await,
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn results_update_both_players() {
        let store = store_with(&["alice", "bob"]).await;

        store.record_result(&GameResult::won("g1", "alice", "bob", "alice")).await.unwrap();
        store.record_result(&GameResult::draw("g2", "alice", "bob")).await.unwrap();
        store
            .record_result(&GameResult::aborted("g3", "alice", "bob", "reset"))
            .await
            .unwrap();

        let alice = store.player_stats("alice").await.unwrap();
        assert_eq!(alice, PlayerStats { games: 2, wins: 1, losses: 0, draws: 1 });
        let bob = store.player_stats("bob").await.unwrap();
        assert_eq!(bob, PlayerStats { games: 2, wins: 0, losses: 1, draws: 1 });
    }

    #[tokio::test]
    async fn leaderboard_orders_by_win_rate_then_name() {
        let store = store_with(&["alice", "bob", "carol"]).await;
        store.record_result(&GameResult::won("g1", "bob", "carol", "bob")).await.unwrap();

        let top = store.top_players(2).await.unwrap();
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["bob", "alice"]);
        assert_eq!(top[0].win_rate, 1.0);
    }
}
