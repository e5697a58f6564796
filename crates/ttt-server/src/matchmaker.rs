//! Matchmaking rendezvous.
//!
//! Sessions submit [`QueuedPlayer`]s through an unbounded channel; the
//! matchmaker task takes them strictly in submission order, two at a
//! time. The earlier submission plays `X` and moves first.
//!
//! While one player waits alone, the matchmaker also watches that
//! player's connection: if they hang up, the entry is dropped (which
//! releases their identity) instead of lingering until shutdown.

use tokio::sync::mpsc;
use tracing::{debug, info};
use ttt_core::Marker;
use ttt_protocol::text;

use crate::connection::ConnectionError;
use crate::game_task::{self, GameContext};
use crate::player::{Player, QueuedPlayer};
use crate::types::{QueueRx, QueueTx};

/// Cloneable submission side, held by sessions.
#[derive(Clone, Debug)]
pub struct MatchmakerHandle {
    tx: QueueTx,
}

impl MatchmakerHandle {
    /// Queue a player. Hands the player back if the matchmaker has stopped.
    pub fn submit(&self, player: QueuedPlayer) -> Result<(), QueuedPlayer> {
        self.tx.send(player).map_err(|mpsc::error::SendError(p)| p)
    }
}

pub(crate) struct Matchmaker {
    queue: QueueRx,
    waiting: Option<QueuedPlayer>,
}

/// What happened while one player was waiting alone.
enum QueueEvent {
    Arrived(Option<QueuedPlayer>),
    Spoke(Result<String, ConnectionError>),
}

impl Matchmaker {
    pub(crate) fn new() -> (Matchmaker, MatchmakerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let matchmaker = Matchmaker {
            queue: rx,
            waiting: None,
        };
        (matchmaker, MatchmakerHandle { tx })
    }

    /// Pair players forever, spawning one game task per pair.
    ///
    /// Ends when every [`MatchmakerHandle`] is gone.
    pub(crate) async fn run(mut self, ctx: GameContext) {
        while let Some((first, second)) = self.next_pair().await {
            info!(x = %first.name(), o = %second.name(), "paired players");
            tokio::spawn(game_task::run_game(ctx.clone(), first, second));
        }
        debug!("matchmaker shutting down (queue closed)");
    }

    /// Wait for the next two live submissions and seat them.
    pub(crate) async fn next_pair(&mut self) -> Option<(Player, Player)> {
        loop {
            let Some(mut first) = self.waiting.take() else {
                self.waiting = Some(self.queue.recv().await?);
                continue;
            };

            // A hang-up that is already pending must win over a new arrival.
            let event = tokio::select! {
                biased;
                line = first.conn.read_line() => QueueEvent::Spoke(line),
                next = self.queue.recv() => QueueEvent::Arrived(next),
            };

            match event {
                QueueEvent::Arrived(Some(mut second)) => {
                    let first_here = still_connected(&mut first).await;
                    let second_here = still_connected(&mut second).await;
                    match (first_here, second_here) {
                        (true, true) => {
                            return Some((first.seat(Marker::X), second.seat(Marker::O)));
                        }
                        (true, false) => self.waiting = Some(first),
                        (false, true) => self.waiting = Some(second),
                        (false, false) => {}
                    }
                }
                QueueEvent::Arrived(None) => return None,
                QueueEvent::Spoke(Ok(_)) => {
                    if first.conn.send(text::STILL_WAITING).await.is_ok() {
                        self.waiting = Some(first);
                    }
                }
                QueueEvent::Spoke(Err(e)) => {
                    info!(player = %first.name(), reason = %e, "left the queue");
                }
            }
        }
    }
}

/// Answer whatever a queued player already typed. `false` once they are gone.
async fn still_connected(player: &mut QueuedPlayer) -> bool {
    while let Some(input) = player.conn.ready_line().await {
        let answered = match input {
            Ok(_) => player.conn.send(text::STILL_WAITING).await,
            Err(e) => Err(e),
        };
        if let Err(e) = answered {
            info!(player = %player.name(), reason = %e, "left the queue");
            return false;
        }
    }
    true
}
