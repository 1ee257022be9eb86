//! Cache Gate Module
//!
//! Read-through access to employees with a single global fill gate.
//!
//! Every read first consults the cache. A miss waits for the gate (a
//! one-permit semaphore shared by all keys), checks the cache again, and only
//! then reads the repository. Callers that queued behind a fill find the
//! published entry on their re-check and never touch the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, Semaphore, SemaphorePermit};
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, CacheKey, CacheStats, CacheStore, CachedValue};
use crate::error::{AppError, Result};
use crate::models::Employee;
use crate::repository::{ensure_valid_id, EmployeeRepository};

// == Cache Gate ==
/// Shared read-through cache in front of an [`EmployeeRepository`].
pub struct CacheGate {
    /// Cached snapshots
    store: Arc<RwLock<CacheStore>>,
    /// Backing repository consulted on misses
    repository: Arc<dyn EmployeeRepository>,
    /// Serializes every cache fill process-wide
    gate: Semaphore,
    /// Upper bound on waiting for the gate
    gate_timeout: Duration,
}

impl CacheGate {
    // == Constructor ==
    /// Creates a gate with an empty cache.
    pub fn new(repository: Arc<dyn EmployeeRepository>, config: &CacheConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(
                config.max_entries,
                config.policy(),
            ))),
            repository,
            gate: Semaphore::new(1),
            gate_timeout: config.gate_timeout,
        }
    }

    /// Shared handle to the underlying store, for background maintenance.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    // == Get All ==
    /// Returns every employee, from cache when fresh.
    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        if let Some(employees) = self.cached_collection().await {
            debug!("Retrieved employees from cache");
            return Ok(employees);
        }

        let _permit = self.acquire().await?;

        if let Some(employees) = self.cached_collection().await {
            debug!("Retrieved employees from cache after waiting for gate");
            return Ok(employees);
        }

        let generation = self.store.read().await.generation();
        let employees = self.repository.list().await?;
        self.publish(
            CacheKey::AllEmployees,
            CachedValue::Collection(employees.clone()),
            generation,
        )
        .await;

        info!(
            count = employees.len(),
            "Retrieved employees from database and cached"
        );
        Ok(employees)
    }

    // == Get By Id ==
    /// Returns one employee, from cache when fresh.
    ///
    /// `Ok(None)` means the store has no such record. Absent results are
    /// cached too, so concurrent lookups of a missing id read the store once.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Employee>> {
        ensure_valid_id(id)?;

        if let Some(employee) = self.cached_employee(id).await {
            debug!(id, "Retrieved employee from cache");
            return Ok(employee);
        }

        let _permit = self.acquire().await?;

        if let Some(employee) = self.cached_employee(id).await {
            debug!(id, "Retrieved employee from cache after waiting for gate");
            return Ok(employee);
        }

        let generation = self.store.read().await.generation();
        let employee = self.repository.get(id).await?;
        self.publish(
            CacheKey::Employee(id),
            CachedValue::Employee(employee.clone()),
            generation,
        )
        .await;

        match &employee {
            Some(_) => info!(id, "Retrieved employee from database and cached"),
            None => warn!(id, "Employee not found"),
        }
        Ok(employee)
    }

    // == Invalidate ==
    /// Drops the cached record for `id` and the collection snapshot.
    pub async fn invalidate(&self, id: i64) {
        let removed = self
            .store
            .write()
            .await
            .invalidate(&[CacheKey::Employee(id), CacheKey::AllEmployees]);
        debug!(id, removed, "Invalidated cache entries");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    async fn acquire(&self) -> Result<SemaphorePermit<'_>> {
        match tokio::time::timeout(self.gate_timeout, self.gate.acquire()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(AppError::Internal("cache gate closed".to_string())),
            Err(_) => {
                warn!(timeout = ?self.gate_timeout, "Timed out waiting for cache gate");
                Err(AppError::GateTimeout(self.gate_timeout))
            }
        }
    }

    async fn cached_collection(&self) -> Option<Vec<Employee>> {
        match self.store.write().await.get(CacheKey::AllEmployees)? {
            CachedValue::Collection(employees) => Some(employees),
            CachedValue::Employee(_) => None,
        }
    }

    async fn cached_employee(&self, id: i64) -> Option<Option<Employee>> {
        match self.store.write().await.get(CacheKey::Employee(id))? {
            CachedValue::Employee(employee) => Some(employee),
            CachedValue::Collection(_) => None,
        }
    }

    async fn publish(&self, key: CacheKey, value: CachedValue, generation: u64) {
        let published = self
            .store
            .write()
            .await
            .insert_if_current(key, value, generation);
        if !published {
            debug!(%key, "Skipped caching a read that raced an invalidation");
        }
    }
}
