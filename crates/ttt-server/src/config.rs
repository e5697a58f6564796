//! Configuration for the game server.
//!
//! Defaults can be overridden via environment variables (and, in the
//! binary, by command-line flags on top of those):
//!
//! - `TTT_BIND_ADDR`        (default: "127.0.0.1")
//! - `TTT_PORT`             (default: "8080")
//! - `TTT_MAX_CLIENTS`      (default: "1024")
//! - `TTT_LOGIN_ATTEMPTS`   (default: "3")
//! - `TTT_LEADERBOARD_SIZE` (default: "10")

use std::env;
use std::str::FromStr;

use anyhow::Context;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on. `0` picks a free port.
    pub port: u16,

    /// Maximum number of simultaneously connected clients
    /// (players, queued players and spectators alike).
    pub max_clients: usize,

    /// Password attempts before a known identity is disconnected.
    pub login_attempts: u32,

    /// Rows returned by the `top10` command.
    pub leaderboard_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            max_clients: 1024,
            login_attempts: 3,
            leaderboard_size: 10,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let bind_addr = env::var("TTT_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("TTT_PORT", defaults.port)?;
        let max_clients = read_env_or_default("TTT_MAX_CLIENTS", defaults.max_clients)?;
        let login_attempts = read_env_or_default("TTT_LOGIN_ATTEMPTS", defaults.login_attempts)?;
        let leaderboard_size =
            read_env_or_default("TTT_LEADERBOARD_SIZE", defaults.leaderboard_size)?;

        Ok(Config {
            bind_addr,
            port,
            max_clients,
            login_attempts: login_attempts.max(1),
            leaderboard_size,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value {val:?} for {key}")),
        Err(_) => Ok(default),
    }
}
