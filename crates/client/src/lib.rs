//! userbase_client - CLI client for userbase API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::UserbaseClient;
pub use error::{ClientError, Result};
