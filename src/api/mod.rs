//! API Module
//!
//! HTTP handlers and routing for the employee REST API.
//!
//! # Endpoints
//! - `GET /employees` - List all employees
//! - `POST /employees` - Create an employee
//! - `GET /employees/:id` - Fetch one employee
//! - `PUT /employees/:id` - Update an employee
//! - `DELETE /employees/:id` - Delete an employee
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
