//! Types for the finder module.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::matcher::{MatchCriterion, MatchError};
use crate::materializer::{MaterializeError, MaterializeReport};
use crate::normalizer::TableError;
use crate::scanner::{MatchSet, ScanError, ScanFailure};

/// Errors that end a run without a report.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Normalizer(#[from] TableError),
}

/// Outcome of the materialize phase.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MaterializePhase {
    /// No destination was configured.
    NotRequested,
    /// Files were processed; see the report for each outcome.
    Completed(MaterializeReport),
    /// The destination could not be used; nothing was written.
    Aborted { destination: PathBuf, reason: String },
}

impl MaterializePhase {
    pub(crate) fn aborted(error: MaterializeError) -> Self {
        match error {
            MaterializeError::TargetInvalid { path, reason } => Self::Aborted {
                destination: path,
                reason,
            },
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    pub fn report(&self) -> Option<&MaterializeReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// The root that was scanned.
    pub root: PathBuf,
    /// The criterion the names were matched against.
    pub criterion: MatchCriterion,
    /// Number of torrent files decoded.
    pub scanned: usize,
    /// Torrent files that could not be decoded.
    pub failures: Vec<ScanFailure>,
    /// Matching torrents in traversal order.
    pub matches: MatchSet,
    pub materialize: MaterializePhase,
}

impl RunReport {
    /// False when the materialize phase was aborted.
    pub fn is_success(&self) -> bool {
        !self.materialize.is_aborted()
    }
}
