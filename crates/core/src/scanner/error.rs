//! Error types for the scanner module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan before any file is visited.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The search root does not exist.
    #[error("Search root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The search root exists but is not a directory.
    #[error("Search root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The search root could not be inspected.
    #[error("Failed to access search root {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
