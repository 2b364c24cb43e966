//! SQLite user service.
//!
//! Implements [`UserService`] from `userbase_core::storage` on top of a
//! [`UserRepository`]. Every mutation runs in its own transaction on the
//! connection thread owned by `tokio-rusqlite`.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

use userbase_core::storage::{RepositoryError, Result, SearchResult, UserService};
use userbase_core::user::{User, UserFilter, UserPatch};

use super::error::{map_tokio_rusqlite_error, map_transaction_error};
use super::repository::{SqliteUserRepository, UserRepository};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Page size bounds applied to every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// SQLite-backed user service.
pub struct SqliteUserService<R = SqliteUserRepository> {
    conn: Connection,
    repository: Arc<R>,
    limits: SearchLimits,
}

impl SqliteUserService {
    /// Opens a file-based database, creating it and its schema if needed.
    pub async fn open(path: &str, limits: SearchLimits) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::new(conn, SqliteUserRepository, limits).await
    }

    /// Opens an in-memory database. Data is lost when the service is dropped.
    #[cfg(test)]
    pub async fn open_in_memory(limits: SearchLimits) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::new(conn, SqliteUserRepository, limits).await
    }
}

impl<R: UserRepository> SqliteUserService<R> {
    /// Wraps an open connection and initializes the schema.
    pub async fn new(conn: Connection, repository: R, limits: SearchLimits) -> Result<Self> {
        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            repository: Arc::new(repository),
            limits,
        })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` succeeds and rolls back when it fails, so a failed
    /// operation leaves the database as it found it.
    ///
    /// Once queued, the closure runs to completion on the connection thread
    /// even if the returned future is dropped: a request cut off by the
    /// timeout layer still commits its write.
    async fn in_transaction<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&R, &SyncConnection) -> Result<T> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);

        let outcome = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                match f(&*repository, &tx) {
                    Ok(value) => {
                        tx.commit().map_err(wrap_err)?;
                        Ok(Ok(value))
                    }
                    Err(e) => {
                        tx.rollback().map_err(wrap_err)?;
                        Ok(Err(e))
                    }
                }
            })
            .await
            .map_err(map_transaction_error)?;

        match &outcome {
            Ok(_) => tracing::debug!(operation, "Transaction committed"),
            Err(e) => tracing::warn!(operation, error = %e, "Transaction rolled back"),
        }

        outcome
    }

    /// Runs a read on the connection thread without opening a transaction.
    async fn read<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&R, &SyncConnection) -> Result<T> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);

        self.conn
            .call(move |conn| Ok(f(&*repository, conn)))
            .await
            .map_err(map_tokio_rusqlite_error)?
    }
}

#[async_trait]
impl<R: UserRepository> UserService for SqliteUserService<R> {
    async fn load(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_string();
        self.read(move |repo, conn| repo.load(conn, &id)).await
    }

    async fn create(&self, user: &User) -> Result<u64> {
        let user = user.clone();
        self.in_transaction("create", move |repo, conn| repo.create(conn, &user))
            .await
    }

    async fn update(&self, user: &User) -> Result<u64> {
        let user = user.clone();
        self.in_transaction("update", move |repo, conn| repo.update(conn, &user))
            .await
    }

    async fn patch(&self, patch: &UserPatch) -> Result<u64> {
        let patch = patch.clone();
        self.in_transaction("patch", move |repo, conn| repo.patch(conn, &patch))
            .await
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let id = id.to_string();
        self.in_transaction("delete", move |repo, conn| repo.delete(conn, &id))
            .await
    }

    async fn search(&self, filter: &UserFilter) -> Result<SearchResult<User>> {
        let filter = filter.clone();
        let limit = filter.effective_limit(self.limits.default_limit, self.limits.max_limit);
        let offset = filter.offset(limit);

        self.read(move |repo, conn| repo.search(conn, &filter, limit, offset))
            .await
    }
}
