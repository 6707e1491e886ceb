//! Error types for the normalizer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a conversion table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("Failed to read conversion table {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token is not exactly two characters.
    #[error("Invalid conversion table entry {token:?} on line {line}")]
    InvalidEntry { line: usize, token: String },
}
