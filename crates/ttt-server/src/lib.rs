//! ttt-server
//!
//! Multi-client async TCP server that logs players in, pairs them into
//! tic-tac-toe games and streams those games to spectators.

pub mod config;
pub mod connection;
pub mod error;
pub mod login;
pub mod matchmaker;
pub mod player;
pub mod registry;
pub mod server;
pub mod spectators;
pub mod state;
pub mod store;
pub mod types;

// internal tasks, only reachable through `Server`
mod game_task;
mod results;
mod session;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use store::{AccountStore, MemoryStore, StatsStore, StoreError};
