//! Mock normalizer for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::normalizer::Normalizer;

/// Mock implementation of the Normalizer trait.
///
/// Applies plain substring replacements in the order they were added and
/// counts how often it was asked to normalize.
///
/// # Example
///
/// ```rust,ignore
/// use torfind_core::testing::MockNormalizer;
///
/// let normalizer = MockNormalizer::new().with_mapping("Q", "x");
/// assert_eq!(normalizer.normalize("Qq"), "xq");
/// assert_eq!(normalizer.calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockNormalizer {
    mappings: Vec<(String, String)>,
    calls: AtomicUsize,
    seen: Arc<RwLock<Vec<String>>>,
}

impl MockNormalizer {
    /// Create a mock that returns its input unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn with_mapping(mut self, from: &str, to: &str) -> Self {
        self.mappings.push((from.to_string(), to.to_string()));
        self
    }

    /// Number of `normalize` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Inputs passed to `normalize`, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.read().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Normalizer for MockNormalizer {
    fn name(&self) -> &str {
        "mock"
    }

    fn normalize(&self, text: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.write() {
            seen.push(text.to_string());
        }
        self.mappings
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}
