//! Expiration Cleanup Task
//!
//! Background task that periodically purges expired cache entries so idle
//! snapshots do not linger until their next lookup.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically removes expired cache entries.
///
/// The task runs until aborted, sleeping for `interval` between runs and
/// taking the store's write lock only for the sweep itself.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(gate.store(), Duration::from_secs(30));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "Starting cache cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, CachedValue, ExpirationPolicy};

    fn store_with(sliding: Duration) -> Arc<RwLock<CacheStore>> {
        let policy = ExpirationPolicy {
            sliding,
            absolute: Duration::from_secs(3600),
        };
        Arc::new(RwLock::new(CacheStore::new(100, policy)))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = store_with(Duration::from_millis(50));
        cache
            .write()
            .await
            .insert(CacheKey::Employee(1), CachedValue::Employee(None));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(250)).await;

        {
            let guard = cache.read().await;
            assert!(guard.is_empty(), "Expired entry should have been cleaned up");
            assert_eq!(guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = store_with(Duration::from_secs(60));
        cache
            .write()
            .await
            .insert(CacheKey::AllEmployees, CachedValue::Collection(Vec::new()));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.read().await.len(), 1, "Valid entry should not be removed");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = store_with(Duration::from_secs(60));

        let handle = spawn_cleanup_task(cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
