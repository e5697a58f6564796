//! Tic-tac-toe TCP server.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttt_server::{Config, MemoryStore, Server};

#[derive(Parser)]
#[clap(name = "ttt-server")]
#[clap(about = "Line-oriented tic-tac-toe server with matchmaking and spectators")]
struct Cli {
    /// Interface to bind (overrides TTT_BIND_ADDR)
    #[clap(short, long)]
    bind: Option<String>,

    /// TCP port (overrides TTT_PORT)
    #[clap(short, long)]
    port: Option<u16>,

    /// Maximum simultaneous connections (overrides TTT_MAX_CLIENTS)
    #[clap(short, long)]
    max_clients: Option<usize>,

    /// Enable debug logging when RUST_LOG is not set
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(max_clients) = cli.max_clients {
        config.max_clients = max_clients;
    }

    info!(?config, "starting ttt-server");

    // One store serves both collaborator roles.
    let store = Arc::new(MemoryStore::new());
    let server = Server::bind(&config, store.clone(), store).await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "could not listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await
}
