//! Trait definitions for the materializer module.

use super::error::MaterializeError;
use super::types::{MaterializeJob, MaterializeReport};
use crate::scanner::MatchSet;

/// Places matched torrent files into a target directory.
pub trait Materializer {
    /// Returns the name of this materializer implementation.
    fn name(&self) -> &str;

    /// Materializes every entry of `matches` according to `job`.
    ///
    /// A job without a destination is a no-op that returns an empty report.
    /// Problems with individual files are recorded in the report; only an
    /// unusable destination is an error.
    fn materialize(
        &self,
        matches: &MatchSet,
        job: &MaterializeJob,
    ) -> Result<MaterializeReport, MaterializeError>;
}

impl<M: Materializer + ?Sized> Materializer for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn materialize(
        &self,
        matches: &MatchSet,
        job: &MaterializeJob,
    ) -> Result<MaterializeReport, MaterializeError> {
        (**self).materialize(matches, job)
    }
}
