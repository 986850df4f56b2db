//! Cached Lookup Service
//!
//! Wraps slow upstream calls with the tiered cache. Keys are derived from
//! the operation name and its parameters, so the cache itself stays
//! key-format agnostic.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::cache::{generate_cache_key, CombinedStats, TieredCache};

/// Read-through cache in front of an upstream data source.
pub struct CachedLookup<V> {
    cache: TieredCache<V>,
}

impl<V> CachedLookup<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: TieredCache<V>) -> Self {
        Self { cache }
    }

    /// Returns the cached result of `method(params)` or runs `loader`.
    ///
    /// Only successful loads are cached, with `ttl` seconds or the cache
    /// default. The cache lock is never held while `loader` runs.
    pub async fn fetch<P, K, F, Fut, E>(
        &self,
        method: &str,
        params: P,
        ttl: Option<f64>,
        loader: F,
    ) -> Result<V, E>
    where
        P: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = generate_cache_key(method, params);

        if let Some(value) = self.cache.get(&key).await {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        debug!(key = %key, "cache miss, calling upstream");
        let value = loader().await?;
        self.cache.set(&key, value.clone(), ttl).await;
        Ok(value)
    }

    /// Drops the cached result of `method(params)`.
    pub async fn invalidate<P, K>(&self, method: &str, params: P) -> bool
    where
        P: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.cache.delete(&generate_cache_key(method, params)).await
    }

    pub async fn stats(&self) -> CombinedStats {
        self.cache.combined_stats().await
    }

    pub fn cache(&self) -> &TieredCache<V> {
        &self.cache
    }
}
