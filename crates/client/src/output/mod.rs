//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Values that have a human-readable rendering.
pub trait Pretty {
    fn pretty(&self) -> String;
}

/// Format a value for output.
pub fn format_output<T: serde::Serialize + Pretty>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => value.pretty(),
    }
}
