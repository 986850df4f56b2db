//! Cache Module
//!
//! In-memory caching with TTL expiration, LRU eviction and lifetime
//! statistics, plus the contract for a persistent tier behind it.

mod entry;
mod key;
mod shared;
mod stats;
mod store;
pub mod tier;


// Re-export public types
pub use entry::{ttl_secs, CacheEntry, MIN_TTL};
pub use key::{generate_cache_key, DIGEST_LEN};
pub use shared::{TtlCache, DEFAULT_MAX_SIZE, DEFAULT_TTL_SECS};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use tier::{CombinedStats, PersistentTier, TierStats, TieredCache};
