//! Cache Module
//!
//! Read-through caching of employee reads: the expiring, LRU-bounded
//! `CacheStore` and the `CacheGate` that fills it at most once per miss.

mod entry;
mod gate;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::{CacheEntry, CacheKey, CachedValue, ExpirationPolicy};
pub use gate::CacheGate;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Cache Config ==
/// Tunables for the cache gate and its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Sliding expiration window, reset on every hit
    pub sliding_ttl: Duration,
    /// Absolute lifetime ceiling of an entry
    pub absolute_ttl: Duration,
    /// Maximum number of entries before LRU eviction
    pub max_entries: usize,
    /// How long a cache miss may wait for the fill gate
    pub gate_timeout: Duration,
}

/// Sliding window used when none is configured.
pub const DEFAULT_SLIDING_TTL: Duration = Duration::from_secs(60);
/// Absolute ceiling used when none is configured.
pub const DEFAULT_ABSOLUTE_TTL: Duration = Duration::from_secs(3600);

impl CacheConfig {
    /// Expiration bounds applied to new entries.
    ///
    /// A zero bound would expire entries as soon as they are filled, so it
    /// is replaced by the default.
    pub fn policy(&self) -> ExpirationPolicy {
        ExpirationPolicy {
            sliding: non_zero_or(self.sliding_ttl, DEFAULT_SLIDING_TTL),
            absolute: non_zero_or(self.absolute_ttl, DEFAULT_ABSOLUTE_TTL),
        }
    }
}

fn non_zero_or(ttl: Duration, default: Duration) -> Duration {
    if ttl.is_zero() {
        default
    } else {
        ttl
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sliding_ttl: DEFAULT_SLIDING_TTL,
            absolute_ttl: DEFAULT_ABSOLUTE_TTL,
            max_entries: 1000,
            gate_timeout: Duration::from_secs(5),
        }
    }
}
