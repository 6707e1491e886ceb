use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::matcher::MatchCriterion;
use crate::materializer::{MaterializeJob, MaterializerConfig};
use crate::scanner::ScanOptions;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub materializer: MaterializerConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

impl Config {
    /// The match criterion described by `search.pattern` and `search.use_regex`.
    pub fn criterion(&self) -> MatchCriterion {
        MatchCriterion::from_query(self.search.pattern.as_deref(), self.search.use_regex)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.search.follow_links,
        }
    }

    /// Target directory, with an empty destination meaning the search root.
    pub fn resolved_destination(&self) -> Option<PathBuf> {
        self.output.destination.as_ref().map(|dest| {
            if dest.as_os_str().is_empty() {
                self.search.path.clone()
            } else {
                dest.clone()
            }
        })
    }

    /// The materialize job for this run.
    pub fn materialize_job(&self) -> MaterializeJob {
        MaterializeJob {
            source_root: self.search.path.clone(),
            destination: self.resolved_destination(),
            rename: self.output.rename,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Root directory to scan.
    #[serde(default = "default_search_path")]
    pub path: PathBuf,
    /// Search text. Absent or empty lists every torrent.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Treat `pattern` as a regular expression.
    #[serde(default)]
    pub use_regex: bool,
    /// Descend into symlinked directories.
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            path: default_search_path(),
            pattern: None,
            use_regex: false,
            follow_links: false,
        }
    }
}

fn default_search_path() -> PathBuf {
    PathBuf::from(".")
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where to copy matches. Unset means report only.
    #[serde(default)]
    pub destination: Option<PathBuf>,
    /// Name copies after the decoded torrent name.
    #[serde(default)]
    pub rename: bool,
}

/// Normalizer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NormalizerConfig {
    /// Additional conversion table layered over the built-in one.
    #[serde(default)]
    pub extra_table: Option<PathBuf>,
}
