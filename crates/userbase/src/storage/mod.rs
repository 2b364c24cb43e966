//! Storage backend implementations.
//!
//! Concrete implementations of the service traits defined in
//! `userbase_core::storage`.

pub mod sqlite;

pub use sqlite::{SearchLimits, SqliteUserService};
