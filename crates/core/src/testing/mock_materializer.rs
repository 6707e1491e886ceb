//! Recording materializer for testing.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::materializer::{
    MaterializeAction, MaterializeError, MaterializeJob, MaterializeOutcome, MaterializeReport,
    Materializer,
};
use crate::scanner::{MatchSet, TorrentRecord};

/// A recorded materialize call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedMaterialize {
    /// Matches handed to the materializer.
    pub records: Vec<TorrentRecord>,
    /// Target directory of the job.
    pub destination: Option<PathBuf>,
    /// Whether renaming was requested.
    pub rename: bool,
}

/// Materializer that records its calls and touches no files.
///
/// Every match is reported as a zero-byte copy under its decoded name.
/// A configured error is returned instead when the job has a destination.
///
/// # Example
///
/// ```rust,ignore
/// use torfind_core::testing::RecordingMaterializer;
///
/// let materializer = RecordingMaterializer::new();
/// let finder = Finder::new(ScriptNormalizer::builtin(), &materializer);
/// finder.run(&config)?;
///
/// assert_eq!(materializer.call_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingMaterializer {
    calls: Arc<RwLock<Vec<RecordedMaterialize>>>,
    fail_with: Option<String>,
}

impl RecordingMaterializer {
    /// Create a new recording materializer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every job that has a destination with `TargetInvalid`.
    pub fn failing(reason: &str) -> Self {
        Self {
            calls: Arc::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    /// Get all recorded calls.
    pub fn recorded(&self) -> Vec<RecordedMaterialize> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    /// Get the number of calls performed.
    pub fn call_count(&self) -> usize {
        self.calls.read().map(|c| c.len()).unwrap_or_default()
    }
}

impl Materializer for RecordingMaterializer {
    fn name(&self) -> &str {
        "recording"
    }

    fn materialize(
        &self,
        matches: &MatchSet,
        job: &MaterializeJob,
    ) -> Result<MaterializeReport, MaterializeError> {
        if let Ok(mut calls) = self.calls.write() {
            calls.push(RecordedMaterialize {
                records: matches.records().to_vec(),
                destination: job.destination.clone(),
                rename: job.rename,
            });
        }

        let Some(destination) = &job.destination else {
            return Ok(MaterializeReport::new(None));
        };
        if let Some(reason) = &self.fail_with {
            return Err(MaterializeError::target_invalid(destination, reason.as_str()));
        }

        let mut report = MaterializeReport::new(Some(destination.clone()));
        for record in matches {
            report.record(MaterializeOutcome {
                relative_path: record.relative_path.clone(),
                decoded_name: record.decoded_name.clone(),
                action: MaterializeAction::Copied {
                    file_name: format!("{}.torrent", record.decoded_name),
                    size_bytes: 0,
                    checksum: String::new(),
                },
            });
        }
        Ok(report)
    }
}
