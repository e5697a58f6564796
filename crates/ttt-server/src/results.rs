//! Results reporter.
//!
//! Games push their [`GameResult`] into a channel and move on; this task
//! is the only place that talks to the statistics store about finished
//! games. Recording is best-effort: failures are logged, never retried,
//! and never reach the players.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::store::StatsStore;
use crate::types::ResultRx;

pub(crate) async fn run_results_reporter(mut results: ResultRx, stats: Arc<dyn StatsStore>) {
    while let Some(result) = results.recv().await {
        if let Some(cause) = &result.failure {
            warn!(game = %result.game_id, %cause, "aborted game will not update statistics");
            continue;
        }

        match stats.record_result(&result).await {
            Ok(()) => info!(
                game = %result.game_id,
                winner = result.winner.as_deref().unwrap_or("-"),
                "result recorded"
            ),
            Err(e) => error!(game = %result.game_id, error = %e, "failed to record result"),
        }
    }

    debug!("results reporter shutting down (all games gone)");
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use ttt_core::GameResult;

    use super::*;
    use crate::store::{AccountStore, MemoryStore};

    #[tokio::test]
    async fn records_decided_games_and_skips_aborted_ones() {
        let store = Arc::new(MemoryStore::new());
        store.create_identity("alice", "a").await.unwrap();
        store.create_identity("bob", "b").await.unwrap();
        // Unknown identities make the store fail; the reporter must carry on.
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(GameResult::won("g0", "ghost", "bob", "ghost")).unwrap();
        tx.send(GameResult::aborted("g1", "alice", "bob", "reset")).unwrap();
        tx.send(GameResult::won("g2", "alice", "bob", "alice")).unwrap();
        drop(tx);

        run_results_reporter(rx, store.clone()).await;

        let alice = store.player_stats("alice").await.unwrap();
        assert_eq!((alice.games, alice.wins), (1, 1));
        let bob = store.player_stats("bob").await.unwrap();
        assert_eq!((bob.games, bob.losses), (1, 1));
    }
}
