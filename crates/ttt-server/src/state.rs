//! Process-wide shared state.
//!
//! Created once, at server start, by [`ServerState::start`], which also
//! spawns the two long-lived background tasks (matchmaker and results
//! reporter). Every session gets a cheap clone.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::game_task::GameContext;
use crate::login::LoggedInUsers;
use crate::matchmaker::{Matchmaker, MatchmakerHandle};
use crate::registry::GameRegistry;
use crate::results::run_results_reporter;
use crate::store::{AccountStore, StatsStore};

#[derive(Clone)]
pub struct ServerState {
    users: LoggedInUsers,
    games: GameRegistry,
    matchmaker: MatchmakerHandle,
    accounts: Arc<dyn AccountStore>,
    stats: Arc<dyn StatsStore>,
    login_attempts: u32,
    leaderboard_size: usize,
}

impl ServerState {
    /// Initialise registries and start the matchmaker and results reporter.
    ///
    /// Must be called from within a tokio runtime. The background tasks
    /// wind down on their own once every clone of this state and every
    /// running game is gone.
    pub fn start(
        config: &Config,
        accounts: Arc<dyn AccountStore>,
        stats: Arc<dyn StatsStore>,
    ) -> Self {
        let games = GameRegistry::new();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (matchmaker, handle) = Matchmaker::new();

        tokio::spawn(matchmaker.run(GameContext {
            registry: games.clone(),
            results: results_tx,
        }));
        tokio::spawn(run_results_reporter(results_rx, stats.clone()));

        ServerState {
            users: LoggedInUsers::new(),
            games,
            matchmaker: handle,
            accounts,
            stats,
            login_attempts: config.login_attempts.max(1),
            leaderboard_size: config.leaderboard_size,
        }
    }

    /// Identities currently bound to a live connection.
    pub fn logged_in(&self) -> &LoggedInUsers {
        &self.users
    }

    /// Games currently in progress.
    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub(crate) fn matchmaker(&self) -> &MatchmakerHandle {
        &self.matchmaker
    }

    pub(crate) fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    pub(crate) fn stats(&self) -> &dyn StatsStore {
        self.stats.as_ref()
    }

    pub(crate) fn login_attempts(&self) -> u32 {
        self.login_attempts
    }

    pub(crate) fn leaderboard_size(&self) -> usize {
        self.leaderboard_size
    }
}
