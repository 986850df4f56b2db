//! Configuration Module
//!
//! Loads cache and server settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_MAX_SIZE, DEFAULT_TTL_SECS};

/// Service configuration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the in-memory cache can hold
    pub max_size: usize,
    /// Default TTL in seconds for entries stored without one
    pub default_ttl: f64,
    /// HTTP admin server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 3600.0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    ///
    /// Missing, unparsable or non-positive values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: positive_var("CACHE_MAX_SIZE", |v: &usize| *v > 0)
                .unwrap_or(defaults.max_size),
            default_ttl: positive_var("CACHE_DEFAULT_TTL", |v: &f64| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.default_ttl),
            server_port: positive_var("SERVER_PORT", |v: &u16| *v > 0)
                .unwrap_or(defaults.server_port),
            cleanup_interval: positive_var("CLEANUP_INTERVAL", |v: &u64| *v > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn positive_var<T: FromStr>(name: &str, valid: impl Fn(&T) -> bool) -> Option<T> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(valid)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: DEFAULT_TTL_SECS,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
