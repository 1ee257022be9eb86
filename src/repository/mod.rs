//! Repository Module
//!
//! Persistence seam between the cache gate/handlers and the database.
//!
//! # Operations
//! - `list` - All employees, ordered by identifier
//! - `get` - One employee by identifier
//! - `create` - Insert a new employee, stamping both timestamps
//! - `update` - Persist changed fields, stamping the modification time
//! - `delete` - Remove an employee; missing records are a no-op

mod sqlite;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Employee, NewEmployee};

pub use sqlite::{Database, SqliteEmployeeRepository};

/// Storage operations for employee records.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Lists every employee.
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Fetches an employee, `None` when absent.
    async fn get(&self, id: i64) -> Result<Option<Employee>>;

    /// Inserts a new employee and returns it with its assigned identifier.
    async fn create(&self, employee: NewEmployee) -> Result<Employee>;

    /// Persists name, email and role of an existing employee.
    ///
    /// Returns the stored record with its refreshed modification time.
    async fn update(&self, employee: &Employee) -> Result<Employee>;

    /// Deletes an employee if it exists.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Rejects identifiers below 1.
pub fn ensure_valid_id(id: i64) -> Result<()> {
    if id < 1 {
        return Err(AppError::InvalidId(id));
    }
    Ok(())
}
