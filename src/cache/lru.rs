//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::VecDeque;

use crate::cache::CacheKey;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Order of keys by access time
    order: VecDeque<CacheKey>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    pub fn touch(&mut self, key: CacheKey) {
        self.remove(key);
        self.order.push_front(key);
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: CacheKey) {
        self.order.retain(|k| *k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        self.order.pop_back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_and_evict_order() {
        let mut lru = LruTracker::new();
        lru.touch(CacheKey::Employee(1));
        lru.touch(CacheKey::Employee(2));
        lru.touch(CacheKey::AllEmployees);

        assert_eq!(lru.evict_oldest(), Some(CacheKey::Employee(1)));
        assert_eq!(lru.evict_oldest(), Some(CacheKey::Employee(2)));
        assert_eq!(lru.evict_oldest(), Some(CacheKey::AllEmployees));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_touch_existing_moves_to_front() {
        let mut lru = LruTracker::new();
        lru.touch(CacheKey::Employee(1));
        lru.touch(CacheKey::Employee(2));
        lru.touch(CacheKey::Employee(1));

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.evict_oldest(), Some(CacheKey::Employee(2)));
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();
        lru.touch(CacheKey::Employee(1));
        lru.touch(CacheKey::Employee(2));
        lru.remove(CacheKey::Employee(1));

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some(CacheKey::Employee(2)));
        assert!(lru.is_empty());
    }
}
