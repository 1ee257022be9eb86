//! Cache Entry Module
//!
//! Defines cache keys, cached values, and individual entries with sliding and
//! absolute expiration.

use std::fmt;
use std::time::{Duration, Instant};

use crate::models::Employee;

// == Cache Key ==
/// Identifies a cached snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Sentinel key for the full employee collection
    AllEmployees,
    /// A single employee by identifier
    Employee(i64),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::AllEmployees => f.write_str("employees:all"),
            CacheKey::Employee(id) => write!(f, "employee:{}", id),
        }
    }
}

// == Cached Value ==
/// Snapshot of store state held by an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// The full collection
    Collection(Vec<Employee>),
    /// One employee, or `None` when the store reported it absent
    Employee(Option<Employee>),
}

// == Expiration Policy ==
/// Lifetime bounds applied to every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    /// Window reset on every access
    pub sliding: Duration,
    /// Hard ceiling measured from creation
    pub absolute: Duration,
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored snapshot
    pub value: CachedValue,
    /// When the entry was filled
    pub created_at: Instant,
    /// Last time the entry was served
    pub last_accessed: Instant,
    policy: ExpirationPolicy,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry filled at `now`.
    pub fn new(value: CachedValue, policy: ExpirationPolicy, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            last_accessed: now,
            policy,
        }
    }

    // == Expires At ==
    /// The instant at which the entry stops being servable.
    ///
    /// Whichever of the sliding window and the absolute ceiling comes first.
    /// A bound that overflows the clock never expires the entry; `None` means
    /// neither bound is reachable.
    pub fn expires_at(&self) -> Option<Instant> {
        let sliding = self.last_accessed.checked_add(self.policy.sliding);
        let absolute = self.created_at.checked_add(self.policy.absolute);
        match (sliding, absolute) {
            (Some(sliding), Some(absolute)) => Some(sliding.min(absolute)),
            (bound, None) | (None, bound) => bound,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches the expiration instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }

    // == Touch ==
    /// Records an access, restarting the sliding window.
    ///
    /// Never moves the absolute ceiling.
    pub fn touch(&mut self, now: Instant) {
        if now > self.last_accessed {
            self.last_accessed = now;
        }
    }
}
