//! Employee API - CRUD service for employee records
//!
//! Reads are served through a TTL-bounded, stampede-guarded cache in front of
//! a SQLite repository; writes invalidate the affected cache entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};
pub use tasks::spawn_cleanup_task;
