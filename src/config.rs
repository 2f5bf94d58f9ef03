//! Relay server configuration

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{RelayError, RelayResult};

/// Default port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Default interval between status log lines
pub const DEFAULT_STATUS_INTERVAL_SECS: u64 = 30;

/// Configuration for the relay server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    /// Host to bind
    pub host: String,
    /// Port to bind (`0` lets the OS pick one)
    pub port: u16,
    /// Seconds between periodic status logs (`0` disables them)
    pub status_interval_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            status_interval_secs: 0,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the process environment
    ///
    /// - `PORT` (default 3000)
    /// - `HOST` (default `0.0.0.0`)
    /// - `RELAY_STATUS_INTERVAL_SECS` (default 30)
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => parse_var("PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let status_interval_secs = match lookup("RELAY_STATUS_INTERVAL_SECS") {
            Some(raw) => parse_var("RELAY_STATUS_INTERVAL_SECS", &raw)?,
            None => DEFAULT_STATUS_INTERVAL_SECS,
        };
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Self {
            host,
            port,
            status_interval_secs,
        })
    }

    /// Resolve the configured host/port into a socket address
    pub fn socket_addr(&self) -> RelayResult<SocketAddr> {
        let target = format!("{}:{}", self.host, self.port);
        target
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(RelayError::Address(target))
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> RelayResult<T> {
    raw.trim().parse().map_err(|_| RelayError::Config {
        var,
        value: raw.to_string(),
    })
}
