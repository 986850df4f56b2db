//! Shared Cache Module
//!
//! Concurrency-safe wrapper around [`CacheStore`]. One mutex guards the map
//! and the statistics together, so a counter change and the map change that
//! caused it are always observed as one event.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{ttl_secs, CacheStats, CacheStore};
use crate::config::Config;

/// Default capacity when none is configured.
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default TTL in seconds when none is configured.
pub const DEFAULT_TTL_SECS: f64 = 3600.0;

// == TTL Cache ==
/// In-memory TTL cache with LRU eviction, shared across tasks.
///
/// Construct one instance per namespace and hand it around in an `Arc`.
/// The only await point in each operation is acquiring the lock; the body
/// then runs to completion, so a cancelled caller either applied the whole
/// operation or none of it.
#[derive(Debug)]
pub struct TtlCache<V> {
    inner: Mutex<CacheStore<V>>,
    max_size: usize,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// Both arguments must be positive. A non-positive TTL is clamped to
    /// the minimum entry lifetime.
    pub fn new(max_size: usize, default_ttl_secs: f64) -> Self {
        let default_ttl = ttl_secs(default_ttl_secs);
        Self {
            inner: Mutex::new(CacheStore::new(max_size, default_ttl)),
            max_size,
            default_ttl,
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_size, config.default_ttl)
    }

    /// Returns the value for `key` if present and live.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().await.get(key)
    }

    /// Stores `value` under `key` with `ttl` seconds, or the default TTL.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<f64>) {
        let ttl = ttl.map(ttl_secs);
        let key = key.into();
        self.inner.lock().await.set(key, value, ttl);
    }

    /// Removes `key`; returns false if it was not cached.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.lock().await.delete(key)
    }

    /// Drops every entry. Lifetime statistics are preserved.
    pub async fn clear(&self) -> usize {
        let removed = self.inner.lock().await.clear();
        info!(removed, "cache cleared");
        removed
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let removed = self.inner.lock().await.cleanup_expired();
        if removed > 0 {
            debug!(removed, "expired entries swept");
        }
        removed
    }

    /// Snapshot of the statistics at call time.
    pub async fn get_stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    /// Snapshot of the current keys, in no particular order.
    pub async fn get_keys(&self) -> Vec<String> {
        self.inner.lock().await.keys()
    }

    /// Current number of entries, including ones expired but not yet removed.
    pub async fn size(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_TTL_SECS)
    }
}
