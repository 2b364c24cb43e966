//! Core types and pure logic for userbase.
//!
//! This crate has no I/O. The server and the client both depend on it for the
//! `User` model, the partial-update and search request shapes, validation, and
//! the storage error vocabulary.

pub mod serde;
pub mod storage;
pub mod user;
