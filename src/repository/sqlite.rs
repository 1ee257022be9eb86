//! SQLite-backed employee repository using sqlx.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::FromRow;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Employee, NewEmployee, Role};
use crate::repository::{ensure_valid_id, EmployeeRepository};

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    role TEXT NOT NULL,
    created_date TEXT NOT NULL,
    last_modified_date TEXT NOT NULL
)
"#;

/// Database connection pool manager
///
/// File databases run in WAL mode with a bounded pool. In-memory databases
/// exist per connection, so they are pinned to a single long-lived connection.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens a connection pool for `database_url`.
    ///
    /// # Arguments
    /// * `database_url` - SQLite URL (e.g. "sqlite:employees.db?mode=rwc" or "sqlite::memory:")
    /// * `max_connections` - Pool size for file databases
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let in_memory = is_in_memory(database_url);

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(10));
        let pool_options = if in_memory {
            pool_options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(max_connections.max(1))
                .idle_timeout(Duration::from_secs(30))
                .max_lifetime(Duration::from_secs(1800))
        };

        let pool = pool_options.connect_with(options).await?;
        debug!(in_memory, "Database pool created");
        Ok(Self { pool })
    }

    /// Creates the employees table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_EMPLOYEES_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Raw employee row as stored in SQLite
#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    created_date: String,
    last_modified_date: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> Result<Self> {
        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse().map_err(AppError::CorruptRecord)?,
            created_date: parse_timestamp(&row.created_date)?,
            last_modified_date: parse_timestamp(&row.last_modified_date)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::CorruptRecord(format!("Invalid timestamp '{}': {}", value, e)))
}

/// SQLite implementation of [`EmployeeRepository`].
#[derive(Clone)]
pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            "SELECT id, name, email, role, created_date, last_modified_date FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>> {
        ensure_valid_id(id)?;

        let row: Option<EmployeeRow> = sqlx::query_as(
            "SELECT id, name, email, role, created_date, last_modified_date FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn create(&self, employee: NewEmployee) -> Result<Employee> {
        let now = Utc::now();
        let stamp = now.to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO employees (name, email, role, created_date, last_modified_date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.role.as_str())
        .bind(&stamp)
        .bind(&stamp)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_rowid(),
            name: employee.name,
            email: employee.email,
            role: employee.role,
            created_date: now,
            last_modified_date: now,
        })
    }

    async fn update(&self, employee: &Employee) -> Result<Employee> {
        ensure_valid_id(employee.id)?;

        // Never let the modification time move backwards
        let modified = Utc::now().max(employee.last_modified_date);

        let result = sqlx::query(
            "UPDATE employees SET name = ?, email = ?, role = ?, last_modified_date = ? WHERE id = ?",
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.role.as_str())
        .bind(modified.to_rfc3339())
        .bind(employee.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(employee.id));
        }

        Ok(Employee {
            last_modified_date: modified,
            ..employee.clone()
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        ensure_valid_id(id)?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete of missing employee ignored");
        }
        Ok(())
    }
}
