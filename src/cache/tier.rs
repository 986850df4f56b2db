//! Tiered Cache Module
//!
//! Contract for an optional persistent tier behind the in-memory cache, and
//! a read-through/write-through combinator over both. The in-memory
//! [`TtlCache`] never learns that a second tier exists.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheStats, TtlCache};
use crate::error::Result;

// == Tier Stats ==
/// Counters reported by a persistent tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

impl TierStats {
    /// Hit rate as a percentage, 0.0 when nothing was read.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.hits + self.misses)
    }
}

// == Persistent Tier ==
/// A slower, durable store that can sit behind the in-memory cache.
///
/// Its TTL is passed per write and is independent of the in-memory TTL.
#[async_trait]
pub trait PersistentTier<V>: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<V>>;

    async fn set(&self, key: &str, value: &V, ttl: Duration) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<bool>;

    async fn clear(&self) -> Result<()>;

    fn stats(&self) -> TierStats;
}

// == Combined Stats ==
/// Statistics across both tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedStats {
    pub memory: CacheStats,
    /// The tier's own counters, which may include other namespaces
    pub persistent: Option<TierStats>,
    /// Memory misses answered by the persistent tier through this cache
    pub persistent_hits: u64,
    /// Share of lookups answered by either tier, in percent
    pub overall_hit_rate: f64,
}

impl CombinedStats {
    fn aggregate(memory: CacheStats, persistent: Option<TierStats>, persistent_hits: u64) -> Self {
        let lookups = memory.hits + memory.misses;
        let answered = memory.hits + persistent_hits.min(memory.misses);
        Self {
            memory,
            persistent,
            persistent_hits,
            overall_hit_rate: percent(answered, lookups),
        }
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

// == Tiered Cache ==
/// In-memory cache optionally backed by a persistent tier.
///
/// Persistent-tier failures are logged and treated as misses, so callers
/// always get memory-only behavior at worst.
pub struct TieredCache<V> {
    memory: Arc<TtlCache<V>>,
    persistent: Option<Arc<dyn PersistentTier<V>>>,
    persistent_ttl: Duration,
    persistent_hits: AtomicU64,
}

impl<V> TieredCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Memory-only cache.
    pub fn new(memory: Arc<TtlCache<V>>) -> Self {
        let persistent_ttl = memory.default_ttl();
        Self {
            memory,
            persistent: None,
            persistent_ttl,
            persistent_hits: AtomicU64::new(0),
        }
    }

    /// Attaches a persistent tier.
    pub fn with_persistent(mut self, tier: Arc<dyn PersistentTier<V>>) -> Self {
        self.persistent = Some(tier);
        self
    }

    /// Overrides the TTL used for persistent writes.
    pub fn with_persistent_ttl(mut self, ttl: Duration) -> Self {
        self.persistent_ttl = ttl;
        self
    }

    pub fn memory(&self) -> &Arc<TtlCache<V>> {
        &self.memory
    }

    /// Looks in memory, then in the persistent tier.
    ///
    /// A persistent hit is copied into memory with the memory default TTL.
    pub async fn get(&self, key: &str) -> Option<V> {
        if let Some(value) = self.memory.get(key).await {
            return Some(value);
        }

        let tier = self.persistent.as_ref()?;
        match tier.get(key).await {
            Ok(Some(value)) => {
                self.persistent_hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "persistent tier hit, promoting to memory");
                self.memory.set(key, value.clone(), None).await;
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "persistent tier read failed");
                None
            }
        }
    }

    /// Writes to memory, then through to the persistent tier.
    pub async fn set(&self, key: &str, value: V, ttl: Option<f64>) {
        self.memory.set(key, value.clone(), ttl).await;
        if let Some(tier) = &self.persistent {
            if let Err(e) = tier.set(key, &value, self.persistent_ttl).await {
                warn!(key, error = %e, "persistent tier write failed");
            }
        }
    }

    /// Deletes from both tiers. True if either tier held the key.
    pub async fn delete(&self, key: &str) -> bool {
        let mut removed = self.memory.delete(key).await;
        if let Some(tier) = &self.persistent {
            match tier.delete(key).await {
                Ok(hit) => removed |= hit,
                Err(e) => warn!(key, error = %e, "persistent tier delete failed"),
            }
        }
        removed
    }

    /// Clears both tiers.
    pub async fn clear(&self) {
        self.memory.clear().await;
        if let Some(tier) = &self.persistent {
            if let Err(e) = tier.clear().await {
                warn!(error = %e, "persistent tier clear failed");
            }
        }
    }

    pub async fn combined_stats(&self) -> CombinedStats {
        let memory = self.memory.get_stats().await;
        let persistent = self.persistent.as_ref().map(|tier| tier.stats());
        let persistent_hits = self.persistent_hits.load(Ordering::Relaxed);
        CombinedStats::aggregate(memory, persistent, persistent_hits)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;

    /// HashMap-backed tier that records its TTLs and can be made to fail.
    #[derive(Default)]
    pub(crate) struct MapTier {
        pub entries: Mutex<HashMap<String, (String, Duration)>>,
        pub failing: AtomicBool,
        hits: AtomicU64,
        misses: AtomicU64,
    }

    impl MapTier {
        fn check(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                Err(CacheError::Tier("unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl PersistentTier<String> for MapTier {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.check()?;
            let found = self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone());
            match found {
                Some(_) => self.hits.fetch_add(1, Ordering::SeqCst),
                None => self.misses.fetch_add(1, Ordering::SeqCst),
            };
            Ok(found)
        }

        async fn set(&self, key: &str, value: &String, ttl: Duration) -> Result<()> {
            self.check()?;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.clone(), ttl));
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool> {
            self.check()?;
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn clear(&self) -> Result<()> {
            self.check()?;
            self.entries.lock().unwrap().clear();
            Ok(())
        }

        fn stats(&self) -> TierStats {
            TierStats {
                hits: self.hits.load(Ordering::SeqCst),
                misses: self.misses.load(Ordering::SeqCst),
                entries: self.entries.lock().unwrap().len() as u64,
            }
        }
    }

    fn tiered() -> (TieredCache<String>, Arc<MapTier>) {
        let tier = Arc::new(MapTier::default());
        let cache = TieredCache::new(Arc::new(TtlCache::new(10, 60.0)))
            .with_persistent(tier.clone())
            .with_persistent_ttl(Duration::from_secs(86_400));
        (cache, tier)
    }

    #[tokio::test]
    async fn test_write_through() {
        let (cache, tier) = tiered();

        cache.set("anime:1", "Cowboy Bebop".to_string(), Some(30.0)).await;

        let stored = tier.entries.lock().unwrap().get("anime:1").cloned();
        assert_eq!(
            stored,
            Some(("Cowboy Bebop".to_string(), Duration::from_secs(86_400)))
        );
        assert_eq!(cache.memory().size().await, 1);
    }

    #[tokio::test]
    async fn test_persistent_hit_promotes() {
        let (cache, tier) = tiered();
        tier.entries
            .lock()
            .unwrap()
            .insert("anime:2".to_string(), ("Trigun".to_string(), Duration::from_secs(1)));

        assert_eq!(cache.get("anime:2").await.as_deref(), Some("Trigun"));
        assert_eq!(cache.memory().size().await, 1);

        // Second read is served from memory.
        assert_eq!(cache.get("anime:2").await.as_deref(), Some("Trigun"));
        let stats = cache.combined_stats().await;
        assert_eq!(stats.memory.hits, 1);
        assert_eq!(stats.memory.misses, 1);
        assert_eq!(stats.persistent.unwrap().hits, 1);
        assert_eq!(stats.persistent_hits, 1);
        assert_eq!(stats.overall_hit_rate, 100.0);
    }

    #[tokio::test]
    async fn test_shared_tier_hit_rate_counts_own_lookups() {
        let (warm, tier) = tiered();
        for i in 0..5 {
            warm.set(&format!("k{i}"), format!("v{i}"), None).await;
        }

        let a = TieredCache::new(Arc::new(TtlCache::new(10, 60.0))).with_persistent(tier.clone());
        for i in 0..5 {
            assert!(a.get(&format!("k{i}")).await.is_some());
        }

        let b = TieredCache::new(Arc::new(TtlCache::new(10, 60.0))).with_persistent(tier.clone());
        assert!(b.get("k0").await.is_some());

        let stats = b.combined_stats().await;
        assert_eq!(stats.memory.misses, 1);
        assert_eq!(stats.persistent.unwrap().hits, 6);
        assert_eq!(stats.persistent_hits, 1);
        assert_eq!(stats.overall_hit_rate, 100.0);

        let stats = a.combined_stats().await;
        assert_eq!(stats.persistent_hits, 5);
        assert_eq!(stats.overall_hit_rate, 100.0);
    }

    #[tokio::test]
    async fn test_set_without_tier_writes_memory() {
        let cache = TieredCache::new(Arc::new(TtlCache::new(10, 60.0)));
        cache.set("solo", "v".to_string(), Some(5.0)).await;
        assert_eq!(cache.memory().get("solo").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_tier_failure_degrades_to_memory() {
        let (cache, tier) = tiered();
        tier.failing.store(true, Ordering::SeqCst);

        cache.set("k", "v".to_string(), None).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        assert!(cache.get("absent").await.is_none());
        assert!(cache.delete("k").await);
    }

    #[tokio::test]
    async fn test_delete_and_clear_both_tiers() {
        let (cache, tier) = tiered();

        cache.set("a", "1".to_string(), None).await;
        cache.set("b", "2".to_string(), None).await;
        assert!(cache.delete("a").await);
        assert!(!cache.delete("a").await);

        cache.clear().await;
        assert_eq!(cache.memory().size().await, 0);
        assert!(tier.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_only_stats() {
        let cache = TieredCache::new(Arc::new(TtlCache::new(10, 60.0)));
        cache.set("k", 1u32, None).await;
        cache.get("k").await;
        cache.get("missing").await;

        let stats = cache.combined_stats().await;
        assert!(stats.persistent.is_none());
        assert_eq!(stats.overall_hit_rate, 50.0);
    }

    #[test]
    fn test_tier_hit_rate() {
        let stats = TierStats {
            hits: 3,
            misses: 1,
            entries: 3,
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert_eq!(TierStats::default().hit_rate(), 0.0);
    }
}
