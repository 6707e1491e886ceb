//! Error types for the matcher module.

use thiserror::Error;

/// Errors that can occur while compiling a match criterion.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The regular expression does not compile.
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
