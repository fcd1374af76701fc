//! Configuration Module
//!
//! Handles loading cache and driver configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Memory budget as a capacity string, e.g. "10MB"
    pub max_memory: String,
    /// TTL in seconds for entries written by the driver, 0 = never expire
    pub default_ttl: u64,
    /// Background sweep interval in seconds, 0 = sweep disabled
    pub sweep_interval: u64,
    /// Number of concurrent driver workers
    pub workers: usize,
    /// Operations each driver worker performs
    pub ops_per_worker: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_MEMORY` - Memory budget (default: 1GB)
    /// - `DEFAULT_TTL` - Driver entry TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    /// - `WORKERS` - Driver concurrency (default: 4)
    /// - `OPS_PER_WORKER` - Driver operations per worker (default: 10000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_memory: env::var("MAX_MEMORY").unwrap_or(defaults.max_memory),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            workers: parse_var("WORKERS").unwrap_or(defaults.workers),
            ops_per_worker: parse_var("OPS_PER_WORKER").unwrap_or(defaults.ops_per_worker),
        }
    }

    /// TTL applied to driver writes.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Sweep interval, or None when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_memory: "1GB".to_string(),
            default_ttl: 300,
            sweep_interval: 0,
            workers: 4,
            ops_per_worker: 10_000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
