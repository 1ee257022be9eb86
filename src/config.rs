//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Longest accepted cache lifetime, in seconds (ten years).
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Sliding expiration window in seconds
    pub cache_sliding_ttl: u64,
    /// Absolute expiration ceiling in seconds
    pub cache_absolute_ttl: u64,
    /// Maximum number of cache entries before LRU eviction
    pub cache_max_entries: usize,
    /// Maximum wait for the cache fill gate in milliseconds
    pub cache_gate_timeout_ms: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - SQLite URL (default: `sqlite:employees.db?mode=rwc`)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_SLIDING_TTL` - Sliding expiration in seconds (default: 60)
    /// - `CACHE_ABSOLUTE_TTL` - Absolute expiration in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_GATE_TIMEOUT_MS` - Gate wait bound in milliseconds (default: 5000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            cache_sliding_ttl: parse_var("CACHE_SLIDING_TTL", defaults.cache_sliding_ttl),
            cache_absolute_ttl: parse_var("CACHE_ABSOLUTE_TTL", defaults.cache_absolute_ttl),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_gate_timeout_ms: parse_var(
                "CACHE_GATE_TIMEOUT_MS",
                defaults.cache_gate_timeout_ms,
            ),
            cleanup_interval: parse_var("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Cache settings derived from this configuration.
    ///
    /// Lifetimes of zero fall back to the defaults; longer ones are capped at
    /// ten years.
    pub fn cache_config(&self) -> CacheConfig {
        let defaults = Self::default();
        CacheConfig {
            sliding_ttl: ttl(self.cache_sliding_ttl, defaults.cache_sliding_ttl),
            absolute_ttl: ttl(self.cache_absolute_ttl, defaults.cache_absolute_ttl),
            max_entries: self.cache_max_entries,
            gate_timeout: Duration::from_millis(self.cache_gate_timeout_ms),
        }
    }
}

fn ttl(secs: u64, default: u64) -> Duration {
    let secs = if secs == 0 { default } else { secs };
    Duration::from_secs(secs.min(MAX_TTL_SECS))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:employees.db?mode=rwc".to_string(),
            db_max_connections: 5,
            server_port: 3000,
            cache_sliding_ttl: 60,
            cache_absolute_ttl: 3600,
            cache_max_entries: 1000,
            cache_gate_timeout_ms: 5000,
            cleanup_interval: 30,
        }
    }
}
