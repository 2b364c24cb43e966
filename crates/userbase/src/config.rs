use std::{env, time::Duration};

use crate::storage::SearchLimits;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "userbase.db")
    pub sqlite_path: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Page size used when a search sets no limit (default: 20)
    pub search_default_limit: u32,
    /// Largest page size a search may request (default: 100)
    pub search_max_limit: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "userbase.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `SEARCH_DEFAULT_LIMIT` - Default search page size (default: 20)
    /// - `SEARCH_MAX_LIMIT` - Maximum search page size (default: 100)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "userbase.db".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            search_default_limit: lookup("SEARCH_DEFAULT_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            search_max_limit: lookup("SEARCH_MAX_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Search page bounds. The default never exceeds the maximum.
    pub fn search_limits(&self) -> SearchLimits {
        let max_limit = self.search_max_limit.max(1);
        SearchLimits {
            default_limit: self.search_default_limit.clamp(1, max_limit),
            max_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
