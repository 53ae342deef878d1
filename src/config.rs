//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::aside::WritePolicy;
use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Default TTL in seconds, 0 = entries never expire
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// What a successful write does to the cached copy
    pub write_policy: WritePolicy,
    /// Simulated latency of the backing repository, in milliseconds
    pub backend_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WRITE_POLICY` - `invalidate` or `refresh` (default: invalidate)
    /// - `BACKEND_LATENCY_MS` - Repository latency (default: 50)
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            write_policy: env_or("WRITE_POLICY", defaults.write_policy),
            backend_latency_ms: env_or("BACKEND_LATENCY_MS", defaults.backend_latency_ms),
        }
    }

    /// Rejects settings the cache cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn backend_latency(&self) -> Duration {
        Duration::from_millis(self.backend_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl: 300,
            server_port: 3000,
            write_policy: WritePolicy::Invalidate,
            backend_latency_ms: 50,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value '{}' for {}", raw, name);
            default
        }),
        Err(_) => default,
    }
}
