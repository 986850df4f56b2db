//! Cache Entry Module
//!
//! Defines a single cached value together with its TTL and access metadata.

use std::time::{Duration, Instant};

/// Smallest TTL accepted for an entry.
pub const MIN_TTL: Duration = Duration::from_millis(1);

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// The TTL is fixed at construction. Replacing a key always builds a fresh
/// entry, so `access_count` starts over at zero.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    value: V,
    /// Creation instant
    created_at: Instant,
    /// Time-to-live, never mutated
    ttl: Duration,
    /// Number of successful reads
    access_count: u64,
    /// Instant of the last successful read (creation instant until then)
    last_accessed: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live; anything shorter than [`MIN_TTL`] is raised to it
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            ttl: ttl.max(MIN_TTL),
            access_count: 0,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// An entry whose age equals its TTL exactly is still live; it expires
    /// once the age strictly exceeds the TTL.
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }

    /// Time elapsed since the entry was created.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Remaining lifetime, zero once expired.
    pub fn time_to_expiry(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_accessed = Instant::now();
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn last_accessed(&self) -> Instant {
        self.last_accessed
    }
}

// == Utility Functions ==
/// Converts caller-supplied TTL seconds into a [`Duration`].
///
/// TTLs must be positive. Non-finite or non-positive input is a caller bug
/// and is clamped to [`MIN_TTL`] rather than rejected.
pub fn ttl_secs(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds)
            .unwrap_or(Duration::MAX)
            .max(MIN_TTL)
    } else {
        MIN_TTL
    }
}
