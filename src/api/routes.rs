//! API Routes
//!
//! Configures the Axum router with all employee API endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_employee, delete_employee, get_employee, health_handler, list_employees,
    stats_handler, update_employee, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /employees` - List all employees
/// - `POST /employees` - Create an employee
/// - `GET /employees/:id` - Fetch one employee
/// - `PUT /employees/:id` - Update an employee
/// - `DELETE /employees/:id` - Delete an employee
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
