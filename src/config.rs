//! Environment-driven configuration.
//!
//! Values come from the process environment (a `.env` file is loaded first
//! via dotenvy in main). Only DATABASE_URL is required.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Per-request timeout; also used as the pool acquire timeout.
    /// Failures surface to the caller, nothing is retried.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:8080"),
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10"),
            request_timeout_secs: try_load("REQUEST_TIMEOUT_SECS", "15"),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .unwrap_or_else(|e| panic!("Invalid {key} value '{raw}': {e}"))
}
