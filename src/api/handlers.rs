//! API Handlers
//!
//! HTTP request handlers for each employee API endpoint.
//!
//! Reads go through the cache gate; writes go straight to the repository and
//! invalidate the affected cache entries before responding.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    Json,
};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::cache::{CacheConfig, CacheGate};
use crate::error::{AppError, Result};
use crate::models::{
    CreateEmployeeRequest, Employee, HealthResponse, StatsResponse, UpdateEmployeeRequest,
};
use crate::repository::{ensure_valid_id, EmployeeRepository, SqliteEmployeeRepository};

/// Application state shared across all handlers.
///
/// The gate and repository are created once at startup and passed explicitly.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of the repository
    pub gate: Arc<CacheGate>,
    /// Repository used directly for writes
    pub repository: Arc<dyn EmployeeRepository>,
}

impl AppState {
    /// Creates a new AppState whose cache gate reads from `repository`.
    pub fn new(repository: Arc<dyn EmployeeRepository>, config: &CacheConfig) -> Self {
        Self {
            gate: Arc::new(CacheGate::new(Arc::clone(&repository), config)),
            repository,
        }
    }

    /// Creates a new AppState backed by a SQLite pool.
    pub fn with_sqlite(pool: SqlitePool, config: &CacheConfig) -> Self {
        Self::new(Arc::new(SqliteEmployeeRepository::new(pool)), config)
    }
}

/// Logs server-side failures with the action that was being attempted.
fn log_failure(action: &'static str) -> impl FnOnce(&AppError) {
    move |err| {
        if err.status_code().is_server_error() {
            error!(error = %err, "Error {}", action);
        }
    }
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    warn!(reason = %rejection.body_text(), "Invalid employee data");
    AppError::Validation(rejection.body_text())
}

fn not_found(id: i64) -> AppError {
    warn!(id, "Employee not found");
    AppError::NotFound(id)
}

/// Handler for GET /employees
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    info!("Retrieving all employee records");

    let employees = state
        .gate
        .get_all()
        .await
        .inspect_err(log_failure("retrieving employees"))?;

    Ok(Json(employees))
}

/// Handler for GET /employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>> {
    info!(id, "Retrieving employee");

    let employee = state
        .gate
        .get_by_id(id)
        .await
        .inspect_err(log_failure("retrieving employee"))?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(employee))
}

/// Handler for POST /employees
///
/// Responds 201 with the created record and its location.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Employee>)> {
    info!("Creating new employee");

    let Json(req) = payload.map_err(reject_payload)?;
    if let Some(message) = req.validate() {
        warn!(%message, "Invalid employee data");
        return Err(AppError::Validation(message));
    }

    let employee = state
        .repository
        .create(req.into_new_employee())
        .await
        .inspect_err(log_failure("creating employee"))?;

    state.gate.invalidate(employee.id).await;
    info!(id = employee.id, "Successfully created new employee");

    let location = format!("/employees/{}", employee.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(employee),
    ))
}

/// Handler for PUT /employees/:id
///
/// Only fields present in the body change. Responds 204.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<StatusCode> {
    info!(id, "Updating employee");
    ensure_valid_id(id)?;

    let Json(req) = payload.map_err(reject_payload)?;
    if let Some(message) = req.validate(id) {
        warn!(id, %message, "Invalid employee data");
        return Err(AppError::Validation(message));
    }

    let mut employee = state
        .repository
        .get(id)
        .await
        .inspect_err(log_failure("loading employee for update"))?
        .ok_or_else(|| not_found(id))?;

    req.apply_to(&mut employee);
    state
        .repository
        .update(&employee)
        .await
        .inspect_err(log_failure("updating employee"))?;

    state.gate.invalidate(id).await;
    info!(id, "Successfully updated employee");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /employees/:id
///
/// Responds 404 when the record is already gone, 204 otherwise.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    info!(id, "Deleting employee");
    ensure_valid_id(id)?;

    state
        .repository
        .get(id)
        .await
        .inspect_err(log_failure("loading employee for delete"))?
        .ok_or_else(|| not_found(id))?;

    state
        .repository
        .delete(id)
        .await
        .inspect_err(log_failure("deleting employee"))?;

    state.gate.invalidate(id).await;
    info!(id, "Successfully deleted employee");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.gate.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
