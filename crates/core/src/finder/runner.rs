//! Pipeline runner.

use tracing::{info, warn};

use super::types::{FinderError, MaterializePhase, RunReport};
use crate::config::Config;
use crate::matcher::Matcher;
use crate::materializer::{FsMaterializer, Materializer};
use crate::normalizer::{Normalizer, ScriptNormalizer};
use crate::scanner::scan_with;

/// Runs scan, match and materialize with the given seams.
pub struct Finder<N, M> {
    normalizer: N,
    materializer: M,
}

impl Finder<ScriptNormalizer, FsMaterializer> {
    /// Builds the standard pipeline from configuration.
    pub fn from_config(config: &Config) -> Result<Self, FinderError> {
        let normalizer = match &config.normalizer.extra_table {
            Some(path) => ScriptNormalizer::with_extra_table(path)?,
            None => ScriptNormalizer::builtin(),
        };
        Ok(Self::new(
            normalizer,
            FsMaterializer::new(config.materializer.clone()),
        ))
    }
}

impl<N: Normalizer, M: Materializer> Finder<N, M> {
    pub fn new(normalizer: N, materializer: M) -> Self {
        Self {
            normalizer,
            materializer,
        }
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn materializer(&self) -> &M {
        &self.materializer
    }

    /// Executes one run.
    ///
    /// Sources under the search root are only ever read.
    pub fn run(&self, config: &Config) -> Result<RunReport, FinderError> {
        let criterion = config.criterion();
        let matcher = Matcher::new(&criterion, &self.normalizer)?;

        let scan = scan_with(&config.search.path, &config.scan_options())?;
        let matches = matcher.filter(&scan.records);
        info!(
            "{} of {} torrents match {:?}",
            matches.len(),
            scan.records.len(),
            criterion
        );

        let job = config.materialize_job();
        let materialize = if job.destination.is_none() {
            MaterializePhase::NotRequested
        } else {
            match self.materializer.materialize(&matches, &job) {
                Ok(report) => MaterializePhase::Completed(report),
                Err(e) => {
                    warn!("Materialize phase aborted: {}", e);
                    MaterializePhase::aborted(e)
                }
            }
        };

        Ok(RunReport {
            root: scan.root,
            criterion,
            scanned: scan.records.len(),
            failures: scan.failures,
            matches,
            materialize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchCriterion, MatchError};
    use crate::scanner::ScanError;
    use crate::testing::{fixtures, MockNormalizer, RecordingMaterializer};
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default();
        config.search.path = root.to_path_buf();
        config
    }

    #[test]
    fn test_run_lists_everything_without_pattern() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
        fixtures::write_torrent(temp.path(), "b.torrent", "Bar");
        let materializer = RecordingMaterializer::new();
        let finder = Finder::new(ScriptNormalizer::builtin(), &materializer);

        let report = finder.run(&config_for(temp.path())).unwrap();

        assert_eq!(report.criterion, MatchCriterion::Unconstrained);
        assert_eq!(report.scanned, 2);
        assert_eq!(report.matches.len(), 2);
        assert!(matches!(report.materialize, MaterializePhase::NotRequested));
        assert_eq!(materializer.call_count(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_run_filters_and_materializes() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
        fixtures::write_torrent(temp.path(), "b.torrent", "Bar");
        let materializer = RecordingMaterializer::new();
        let finder = Finder::new(ScriptNormalizer::builtin(), &materializer);

        let mut config = config_for(temp.path());
        config.search.pattern = Some("foo".to_string());
        config.output.destination = Some(temp.path().join("out"));
        config.output.rename = true;

        let report = finder.run(&config).unwrap();

        assert_eq!(report.matches.get("./a.torrent"), Some("Foo"));
        assert_eq!(report.matches.len(), 1);
        let recorded = materializer.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].records.len(), 1);
        assert!(recorded[0].rename);
        assert_eq!(report.materialize.report().unwrap().copied_count(), 1);
    }

    #[test]
    fn test_invalid_pattern_stops_before_materialize() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
        let materializer = RecordingMaterializer::new();
        let finder = Finder::new(ScriptNormalizer::builtin(), &materializer);

        let mut config = config_for(temp.path());
        config.search.pattern = Some("[unclosed".to_string());
        config.search.use_regex = true;
        config.output.destination = Some(temp.path().join("out"));

        let err = finder.run(&config).unwrap_err();
        assert!(matches!(
            err,
            FinderError::Match(MatchError::InvalidPattern { .. })
        ));
        assert_eq!(materializer.call_count(), 0);
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_invalid_pattern_checked_before_scan() {
        let temp = TempDir::new().unwrap();
        let finder = Finder::new(ScriptNormalizer::builtin(), RecordingMaterializer::new());

        let mut config = config_for(&temp.path().join("missing"));
        config.search.pattern = Some("(".to_string());
        config.search.use_regex = true;

        assert!(matches!(finder.run(&config), Err(FinderError::Match(_))));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let finder = Finder::new(ScriptNormalizer::builtin(), RecordingMaterializer::new());

        let err = finder
            .run(&config_for(&temp.path().join("missing")))
            .unwrap_err();
        assert!(matches!(err, FinderError::Scan(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn test_aborted_materialize_still_reports_matches() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
        let finder = Finder::new(
            ScriptNormalizer::builtin(),
            RecordingMaterializer::failing("read-only"),
        );

        let mut config = config_for(temp.path());
        config.output.destination = Some(temp.path().join("out"));

        let report = finder.run(&config).unwrap();
        assert_eq!(report.matches.len(), 1);
        assert!(report.materialize.is_aborted());
        assert!(!report.is_success());
    }

    #[test]
    fn test_empty_destination_targets_search_root() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
        let materializer = RecordingMaterializer::new();
        let finder = Finder::new(ScriptNormalizer::builtin(), &materializer);

        let mut config = config_for(temp.path());
        config.output.destination = Some(std::path::PathBuf::new());
        finder.run(&config).unwrap();

        assert_eq!(
            materializer.recorded()[0].destination.as_deref(),
            Some(temp.path())
        );
    }

    #[test]
    fn test_normalizer_is_used_for_query_and_names() {
        let temp = TempDir::new().unwrap();
        fixtures::write_torrent(temp.path(), "a.torrent", "Alpha");
        fixtures::write_torrent(temp.path(), "b.torrent", "Beta");
        let normalizer = MockNormalizer::new().with_mapping("Alpha", "needle");
        let finder = Finder::new(&normalizer, RecordingMaterializer::new());

        let mut config = config_for(temp.path());
        config.search.pattern = Some("NEEDLE".to_string());
        let report = finder.run(&config).unwrap();

        assert_eq!(report.matches.get("./a.torrent"), Some("Alpha"));
        assert_eq!(report.matches.len(), 1);
        assert_eq!(normalizer.seen(), vec!["NEEDLE", "Alpha", "Beta"]);
    }

    #[test]
    fn test_from_config_with_missing_extra_table() {
        let mut config = Config::default();
        config.normalizer.extra_table = Some("/nonexistent/table.txt".into());
        assert!(matches!(
            Finder::from_config(&config),
            Err(FinderError::Normalizer(_))
        ));
    }
}
