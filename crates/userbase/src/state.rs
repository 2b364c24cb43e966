//! Application state.
//!
//! Shared by every request handler. Storage is reached through the
//! `UserService` trait object so handlers never see SQLite directly.

use std::{sync::Arc, time::Duration};

use userbase_core::storage::UserService;

use crate::{config::Config, storage::SqliteUserService};

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// User service backed by the configured database.
    pub user_service: Arc<dyn UserService>,
    /// How long a request may run before it is answered with 408.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates AppState with SQLite storage at `config.sqlite_path`.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let service =
            SqliteUserService::open(&config.sqlite_path, config.search_limits()).await?;

        tracing::info!(path = %config.sqlite_path, "Opened SQLite database");

        Ok(Self::with_service(Arc::new(service), config.request_timeout()))
    }

    /// Creates AppState around an existing service.
    pub fn with_service(user_service: Arc<dyn UserService>, request_timeout: Duration) -> Self {
        Self {
            user_service,
            request_timeout,
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
impl AppState {
    /// AppState over a fresh in-memory database with default search limits.
    pub async fn in_memory() -> Self {
        let service = SqliteUserService::open_in_memory(crate::storage::SearchLimits::default())
            .await
            .expect("in-memory database should open");

        Self::with_service(Arc::new(service), Duration::from_secs(10))
    }
}
