//! SQLite storage backend.
//!
//! Uses `rusqlite` for the SQL itself and `tokio-rusqlite` to run it on a
//! dedicated connection thread.

mod conversions;
mod error;
mod queries;
mod repository;
mod schema;
mod service;

pub use service::{SearchLimits, SqliteUserService};
