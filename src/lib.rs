//! Anime Cache - caching core for an anime-metadata lookup service
//!
//! An in-memory TTL cache with LRU eviction and lifetime statistics, meant
//! to sit in front of a slow, rate-limited upstream API and optionally in
//! front of a persistent tier.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

#[doc(hidden)]
pub use serde_json as __serde_json;

pub use api::AppState;
pub use cache::{generate_cache_key, CacheStats, TtlCache};
pub use config::Config;
pub use service::CachedLookup;
pub use tasks::spawn_cleanup_task;
