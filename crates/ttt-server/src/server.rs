//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Binds the configured address/port.
//! - Starts the shared [`ServerState`] (matchmaker and results reporter).
//! - Accepts connections, assigns each a `ClientId` and spawns a session
//!   task for it.
//!
//! Connections over `max_clients` get a short "server full" line and are
//! dropped without ever reaching the session layer.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{info, warn};
use ttt_protocol::text;

use crate::config::Config;
use crate::connection::Connection;
use crate::session::run_session;
use crate::state::ServerState;
use crate::store::{AccountStore, StatsStore};
use crate::types::ClientId;

/// Pause after a failed `accept` so a persistent error doesn't spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
}

pub struct Server {
    listener: TcpListener,
    state: ServerState,
    limiter: Arc<Semaphore>,
    max_clients: usize,
}

impl Server {
    /// Bind the listener and start the background tasks.
    pub async fn bind(
        config: &Config,
        accounts: Arc<dyn AccountStore>,
        stats: Arc<dyn StatsStore>,
    ) -> anyhow::Result<Server> {
        let addr = config.socket_addr_string();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let max_clients = config.max_clients.max(1);

        Ok(Server {
            listener,
            state: ServerState::start(config, accounts, stats),
            limiter: Arc::new(Semaphore::new(max_clients)),
            max_clients,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Accept connections forever.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` resolves. Sessions and games
    /// already running are left to finish on their own.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        info!(addr = %self.local_addr()?, max_clients = self.max_clients, "listening");
        tokio::pin!(shutdown);

        loop {
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                () = &mut shutdown => {
                    info!("shutdown requested, no longer accepting connections");
                    return Ok(());
                }
            };

            match accepted {
                Ok((stream, peer)) => self.admit(stream, peer),
                // Out of descriptors, aborted handshakes and the like only
                // cost the one connection; the listener stays up.
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }

    fn admit(&self, stream: TcpStream, peer: SocketAddr) {
        let Ok(permit) = self.limiter.clone().try_acquire_owned() else {
            warn!(%peer, max_clients = self.max_clients, "rejecting connection: server full");
            tokio::spawn(reject(stream));
            return;
        };

        let client = next_client_id();
        let conn = match Connection::new(client, stream, permit) {
            Ok(conn) => conn,
            Err(e) => {
                warn!(%client, %peer, error = %e, "could not set up connection");
                return;
            }
        };

        info!(%client, %peer, "accepted connection");
        tokio::spawn(run_session(self.state.clone(), conn));
    }
}

async fn reject(mut stream: TcpStream) {
    let _ = stream.write_all(text::SERVER_FULL.as_bytes()).await;
    let _ = stream.shutdown().await;
}
