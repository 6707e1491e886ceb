//! Matcher module for selecting torrents by name.
//!
//! A [`MatchCriterion`] is compiled once into a [`Matcher`], which then
//! filters a scanned [`MatchSet`](crate::scanner::MatchSet). Both the
//! criterion text and every candidate name go through the same
//! [`Normalizer`](crate::normalizer::Normalizer), so the comparison ignores
//! script variants as well as letter case.
//!
//! # Example
//!
//! ```ignore
//! use torfind_core::matcher::{MatchCriterion, Matcher};
//! use torfind_core::normalizer::ScriptNormalizer;
//!
//! let criterion = MatchCriterion::from_query(Some("样本"), false);
//! let matcher = Matcher::new(&criterion, ScriptNormalizer::builtin())?;
//! let matches = matcher.filter(&scan_result.records);
//! ```

mod criterion;
mod error;
mod filter;

pub use criterion::MatchCriterion;
pub use error::MatchError;
pub use filter::{filter, Matcher};
