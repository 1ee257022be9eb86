//! Cache Store Module
//!
//! The shared mapping guarded by the cache gate: HashMap storage with LRU
//! tracking, sliding/absolute expiration and an invalidation generation.

use std::collections::HashMap;
use std::time::Instant;

use crate::cache::{CacheEntry, CacheKey, CacheStats, CachedValue, ExpirationPolicy, LruTracker};

// == Cache Store ==
/// Cache storage with LRU eviction and expiration support.
#[derive(Debug)]
pub struct CacheStore {
    /// Snapshot storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime bounds for new entries
    policy: ExpirationPolicy,
    /// Bumped on every invalidation
    generation: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and expiration policy.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(max_entries: usize, policy: ExpirationPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            policy,
            generation: 0,
        }
    }

    // == Get ==
    /// Retrieves a snapshot by key, restarting its sliding window.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: CacheKey) -> Option<CachedValue> {
        self.get_at(key, Instant::now())
    }

    /// Same as [`CacheStore::get`], evaluated at `now`.
    pub fn get_at(&mut self, key: CacheKey, now: Instant) -> Option<CachedValue> {
        let expired = match self.entries.get(&key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(&key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let entry = self.entries.get_mut(&key)?;
        entry.touch(now);
        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Insert ==
    /// Stores a freshly read snapshot.
    ///
    /// Overwrites any existing entry for the key. If the cache is at capacity,
    /// the least recently used entry is evicted first.
    pub fn insert(&mut self, key: CacheKey, value: CachedValue) {
        self.insert_at(key, value, Instant::now());
    }

    /// Same as [`CacheStore::insert`], with the entry created at `now`.
    pub fn insert_at(&mut self, key: CacheKey, value: CachedValue, now: Instant) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries
            .insert(key, CacheEntry::new(value, self.policy, now));
        self.lru.touch(key);
        self.stats.record_fill();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Insert If Current ==
    /// Stores a snapshot only if no invalidation happened since `generation`
    /// was observed.
    ///
    /// Returns whether the snapshot was published.
    pub fn insert_if_current(&mut self, key: CacheKey, value: CachedValue, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.insert(key, value);
        true
    }

    // == Invalidate ==
    /// Removes the given keys and bumps the generation.
    ///
    /// Returns the number of entries actually removed.
    pub fn invalidate(&mut self, keys: &[CacheKey]) -> usize {
        self.generation += 1;
        self.stats.record_invalidation();

        let removed = keys
            .iter()
            .filter(|key| {
                self.lru.remove(**key);
                self.entries.remove(*key).is_some()
            })
            .count();

        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Generation ==
    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    /// Same as [`CacheStore::cleanup_expired`], evaluated at `now`.
    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| *key)
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(*key);
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn policy() -> ExpirationPolicy {
        ExpirationPolicy {
            sliding: Duration::from_secs(60),
            absolute: Duration::from_secs(3600),
        }
    }

    fn absent() -> CachedValue {
        CachedValue::Employee(None)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, policy());
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = CacheStore::new(100, policy());

        store.insert(CacheKey::AllEmployees, CachedValue::Collection(Vec::new()));
        let value = store.get(CacheKey::AllEmployees);

        assert_eq!(value, Some(CachedValue::Collection(Vec::new())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100, policy());
        assert!(store.get(CacheKey::Employee(1)).is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, policy());

        store.insert(CacheKey::Employee(1), absent());
        store.insert(CacheKey::Employee(1), CachedValue::Collection(Vec::new()));

        assert_eq!(
            store.get(CacheKey::Employee(1)),
            Some(CachedValue::Collection(Vec::new()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_expired_entry_removed_on_get() {
        let mut store = CacheStore::new(100, policy());
        let now = Instant::now();

        store.insert_at(CacheKey::Employee(1), absent(), now);
        assert!(store
            .get_at(CacheKey::Employee(1), now + Duration::from_secs(59))
            .is_some());

        // 59s access restarted the sliding window, so 118s is still fresh
        assert!(store
            .get_at(CacheKey::Employee(1), now + Duration::from_secs(118))
            .is_some());
        assert!(store
            .get_at(CacheKey::Employee(1), now + Duration::from_secs(200))
            .is_none());

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3, policy());

        store.insert(CacheKey::Employee(1), absent());
        store.insert(CacheKey::Employee(2), absent());
        store.insert(CacheKey::Employee(3), absent());

        // Access 1 so that 2 becomes the eviction candidate
        store.get(CacheKey::Employee(1));
        store.insert(CacheKey::Employee(4), absent());

        assert_eq!(store.len(), 3);
        assert!(store.get(CacheKey::Employee(1)).is_some());
        assert!(store.get(CacheKey::Employee(2)).is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_invalidate_removes_keys_and_bumps_generation() {
        let mut store = CacheStore::new(100, policy());
        store.insert(CacheKey::Employee(5), absent());
        store.insert(CacheKey::Employee(6), absent());
        store.insert(CacheKey::AllEmployees, CachedValue::Collection(Vec::new()));

        let removed = store.invalidate(&[CacheKey::Employee(5), CacheKey::AllEmployees]);

        assert_eq!(removed, 2);
        assert_eq!(store.generation(), 1);
        assert!(store.get(CacheKey::Employee(5)).is_none());
        assert!(store.get(CacheKey::AllEmployees).is_none());
        assert!(store.get(CacheKey::Employee(6)).is_some());
        assert_eq!(store.stats().invalidations, 1);
    }

    #[test]
    fn test_store_insert_if_current_rejects_stale_generation() {
        let mut store = CacheStore::new(100, policy());
        let observed = store.generation();

        store.invalidate(&[CacheKey::Employee(1)]);

        assert!(!store.insert_if_current(CacheKey::Employee(1), absent(), observed));
        assert!(store.is_empty());
        assert!(store.insert_if_current(CacheKey::Employee(1), absent(), store.generation()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100, policy());
        let now = Instant::now();

        store.insert_at(CacheKey::Employee(1), absent(), now);
        store.insert_at(
            CacheKey::Employee(2),
            absent(),
            now + Duration::from_secs(30),
        );

        let removed = store.cleanup_expired_at(now + Duration::from_secs(61));
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_zero_capacity_holds_one() {
        let mut store = CacheStore::new(0, policy());
        store.insert(CacheKey::Employee(1), absent());
        store.insert(CacheKey::Employee(2), absent());
        assert_eq!(store.len(), 1);
    }
}
