//! Error types for the materializer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the materialize phase.
///
/// Failures on individual files are not errors; they are recorded as
/// [`MaterializeAction::Failed`](super::MaterializeAction::Failed) in the report.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The destination cannot receive files.
    #[error("Invalid target directory {path}: {reason}")]
    TargetInvalid { path: PathBuf, reason: String },
}

impl MaterializeError {
    /// Creates a target invalid error.
    pub fn target_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::TargetInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::TargetInvalid { path, .. } => path,
        }
    }
}
