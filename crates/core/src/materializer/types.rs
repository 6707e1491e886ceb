//! Types for the materializer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hash used to compare file contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumType {
    /// MD5 checksum (fast, sufficient for duplicate detection).
    #[default]
    Md5,
    /// SHA-256 checksum.
    Sha256,
}

/// A materialize request.
#[derive(Debug, Clone)]
pub struct MaterializeJob {
    /// Root the match set's relative paths are resolved against.
    pub source_root: PathBuf,
    /// Target directory. `None` means report only; nothing is written.
    pub destination: Option<PathBuf>,
    /// Name copies `<decoded name>.torrent` instead of keeping the file name.
    pub rename: bool,
}

impl MaterializeJob {
    /// Creates a report-only job.
    pub fn report_only(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination: None,
            rename: false,
        }
    }

    /// Sets the target directory.
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Enables naming copies after their decoded name.
    pub fn with_rename(mut self, rename: bool) -> Self {
        self.rename = rename;
        self
    }
}

/// What happened to one matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MaterializeAction {
    /// A new file was written.
    Copied {
        file_name: String,
        size_bytes: u64,
        checksum: String,
    },
    /// A file with identical content already exists under `file_name`.
    SkippedDuplicate { file_name: String },
    /// The target would be the source file itself.
    SkippedSameFile,
    /// The file could not be processed; the run continued.
    Failed { reason: String },
}

/// Outcome for one entry of the match set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeOutcome {
    /// Path relative to the search root.
    pub relative_path: String,
    /// Decoded torrent name.
    pub decoded_name: String,
    /// What was done.
    #[serde(flatten)]
    pub action: MaterializeAction,
}

/// Result of a materialize run, one outcome per match in match-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeReport {
    /// Target directory, `None` for report-only runs.
    pub destination: Option<PathBuf>,
    /// Per-file outcomes.
    pub outcomes: Vec<MaterializeOutcome>,
    /// Total bytes written.
    pub total_bytes: u64,
}

impl MaterializeReport {
    /// Creates an empty report for `destination`.
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self {
            destination,
            outcomes: Vec::new(),
            total_bytes: 0,
        }
    }

    /// Appends an outcome, keeping the byte total current.
    pub fn record(&mut self, outcome: MaterializeOutcome) {
        if let MaterializeAction::Copied { size_bytes, .. } = &outcome.action {
            self.total_bytes += size_bytes;
        }
        self.outcomes.push(outcome);
    }

    pub fn copied_count(&self) -> usize {
        self.count(|a| matches!(a, MaterializeAction::Copied { .. }))
    }

    /// Duplicates and same-file skips.
    pub fn skipped_count(&self) -> usize {
        self.count(|a| {
            matches!(
                a,
                MaterializeAction::SkippedDuplicate { .. } | MaterializeAction::SkippedSameFile
            )
        })
    }

    pub fn failed_count(&self) -> usize {
        self.count(|a| matches!(a, MaterializeAction::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&MaterializeAction) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.action)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(action: MaterializeAction) -> MaterializeOutcome {
        MaterializeOutcome {
            relative_path: "./a.torrent".to_string(),
            decoded_name: "A".to_string(),
            action,
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = MaterializeReport::new(Some(PathBuf::from("/out")));
        report.record(outcome(MaterializeAction::Copied {
            file_name: "a.torrent".to_string(),
            size_bytes: 10,
            checksum: "x".to_string(),
        }));
        report.record(outcome(MaterializeAction::Copied {
            file_name: "a_1.torrent".to_string(),
            size_bytes: 5,
            checksum: "y".to_string(),
        }));
        report.record(outcome(MaterializeAction::SkippedSameFile));
        report.record(outcome(MaterializeAction::SkippedDuplicate {
            file_name: "b.torrent".to_string(),
        }));
        report.record(outcome(MaterializeAction::Failed {
            reason: "gone".to_string(),
        }));

        assert_eq!(report.copied_count(), 2);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.total_bytes, 15);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(outcome(MaterializeAction::SkippedDuplicate {
            file_name: "a.torrent".to_string(),
        }))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "relative_path": "./a.torrent",
                "decoded_name": "A",
                "action": "skipped_duplicate",
                "file_name": "a.torrent",
            })
        );
    }

    #[test]
    fn test_checksum_type_serde() {
        assert_eq!(
            serde_json::to_string(&ChecksumType::Sha256).unwrap(),
            "\"sha256\""
        );
        assert_eq!(ChecksumType::default(), ChecksumType::Md5);
    }
}
