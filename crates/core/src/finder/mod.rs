//! End-to-end find pipeline.
//!
//! A run compiles the match criterion, scans the search root, filters the
//! decoded names and, when a destination is configured, materializes the
//! matches:
//! - **Criterion**: compiled first, so a bad pattern fails before any I/O
//! - **Scan**: an invalid root is fatal, undecodable files are reported
//! - **Materialize**: an unusable destination aborts only this phase

mod runner;
mod types;

pub use runner::Finder;
pub use types::{FinderError, MaterializePhase, RunReport};
