//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

use crate::domain::pool::DEFAULT_MIN_STAKE;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Minimum stake an entry must strictly exceed, in wei.
    pub min_stake: u128,

    /// Manager identity for the pool. When unset, a fresh identity is
    /// generated at startup and logged — the operator plays the role
    /// of the deploying account.
    pub manager_id: Option<uuid::Uuid>,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let min_stake = parse_env("MIN_STAKE_WEI", DEFAULT_MIN_STAKE);
        let manager_id = std::env::var("MANAGER_ID").ok().and_then(|v| v.parse().ok());
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 10_000);

        Ok(Self {
            listen_addr,
            min_stake,
            manager_id,
            event_bus_capacity,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
