//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check expiration, invalidation, capacity and statistics
//! behaviour of the cache store. Time is driven through explicit instants, so
//! none of these tests sleep.

use proptest::prelude::*;
use std::time::{Duration, Instant};

use crate::cache::{CacheKey, CacheStore, CachedValue, ExpirationPolicy};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

fn policy(sliding_ms: u64, absolute_ms: u64) -> ExpirationPolicy {
    ExpirationPolicy {
        sliding: Duration::from_millis(sliding_ms),
        absolute: Duration::from_millis(absolute_ms),
    }
}

fn absent() -> CachedValue {
    CachedValue::Employee(None)
}

// == Strategies ==
/// Generates cache keys over a small id range so operations collide often
fn key_strategy() -> impl Strategy<Value = CacheKey> {
    prop_oneof![
        1 => Just(CacheKey::AllEmployees),
        4 => (1i64..20).prop_map(CacheKey::Employee),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: CacheKey },
    Get { key: CacheKey },
    Invalidate { id: i64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        key_strategy().prop_map(|key| CacheOp::Insert { key }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        (1i64..20).prop_map(|id| CacheOp::Invalidate { id }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // An entry is never served at or past its absolute ceiling, no matter how
    // frequently it is accessed.
    #[test]
    fn prop_absolute_ceiling_never_exceeded(
        sliding_ms in 10u64..200,
        absolute_ms in 10u64..500,
        gaps in prop::collection::vec(1u64..50, 1..60)
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, policy(sliding_ms, absolute_ms));
        let start = Instant::now();
        let ceiling = start + Duration::from_millis(absolute_ms);
        store.insert_at(CacheKey::Employee(1), absent(), start);

        let mut now = start;
        for gap in gaps {
            now += Duration::from_millis(gap);
            let served = store.get_at(CacheKey::Employee(1), now).is_some();
            if now >= ceiling {
                prop_assert!(!served, "served {:?} past the ceiling", now - ceiling);
            }
            if !served {
                break;
            }
        }
    }

    // With no ceiling in play, an entry survives exactly as long as each gap
    // between accesses stays inside the sliding window.
    #[test]
    fn prop_sliding_window_matches_model(
        sliding_ms in 10u64..100,
        gaps in prop::collection::vec(1u64..150, 1..30)
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, policy(sliding_ms, 3_600_000));
        let start = Instant::now();
        store.insert_at(CacheKey::AllEmployees, CachedValue::Collection(Vec::new()), start);

        let mut now = start;
        for gap in gaps {
            now += Duration::from_millis(gap);
            let served = store.get_at(CacheKey::AllEmployees, now).is_some();
            prop_assert_eq!(served, gap < sliding_ms);
            if !served {
                prop_assert!(store.is_empty());
                break;
            }
        }
    }

    // After invalidating an id, neither its entry nor the collection snapshot
    // is served until refilled.
    #[test]
    fn prop_invalidate_purges_record_and_collection(
        ops in prop::collection::vec(cache_op_strategy(), 0..60),
        id in 1i64..20
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, policy(60_000, 3_600_000));
        for op in ops {
            match op {
                CacheOp::Insert { key } => store.insert(key, absent()),
                CacheOp::Get { key } => { store.get(key); }
                CacheOp::Invalidate { id } => {
                    store.invalidate(&[CacheKey::Employee(id), CacheKey::AllEmployees]);
                }
            }
        }

        store.invalidate(&[CacheKey::Employee(id), CacheKey::AllEmployees]);

        prop_assert!(store.get(CacheKey::Employee(id)).is_none());
        prop_assert!(store.get(CacheKey::AllEmployees).is_none());
    }

    // A fill that observed a generation older than the latest invalidation is
    // never published.
    #[test]
    fn prop_stale_generation_never_published(
        invalidations in 1usize..10,
        key in key_strategy()
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, policy(60_000, 3_600_000));
        let observed = store.generation();
        for _ in 0..invalidations {
            store.invalidate(&[key]);
        }

        prop_assert!(!store.insert_if_current(key, absent(), observed));
        prop_assert!(store.get(key).is_none());
    }

    // For any sequence of operations, hits + misses equals the number of
    // lookups and the entry count matches the store length.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, policy(60_000, 3_600_000));
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_fills: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Insert { key } => {
                    store.insert(key, absent());
                    expected_fills += 1;
                }
                CacheOp::Get { key } => match store.get(key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Invalidate { id } => {
                    store.invalidate(&[CacheKey::Employee(id), CacheKey::AllEmployees]);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.fills, expected_fills, "Fills mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // The number of entries never exceeds the configured capacity.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec(key_strategy(), 1..200),
        max_entries in 1usize..10
    ) {
        let mut store = CacheStore::new(max_entries, policy(60_000, 3_600_000));

        for key in keys {
            store.insert(key, absent());
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }
}
