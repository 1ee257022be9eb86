//! Domain and transport models for the employee API
//!
//! `employee` holds the persisted record; `requests` and `responses` are the
//! DTOs used for serializing/deserializing HTTP bodies.

pub mod employee;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use employee::{normalize_email, Employee, NewEmployee, Role};
pub use requests::{CreateEmployeeRequest, UpdateEmployeeRequest};
pub use responses::{HealthResponse, StatsResponse};
