//! Table-driven Traditional → Simplified normalizer.

use std::borrow::Cow;
use std::path::Path;

use super::error::TableError;
use super::table::CharTable;
use super::traits::Normalizer;

/// Folds Chinese script variants one character at a time.
///
/// Characters without a table entry pass through unchanged, so ASCII and
/// already-simplified text come out as they went in.
#[derive(Debug, Clone)]
pub struct ScriptNormalizer {
    table: Cow<'static, CharTable>,
}

impl ScriptNormalizer {
    /// Creates a normalizer over a custom table.
    pub fn new(table: CharTable) -> Self {
        Self {
            table: Cow::Owned(table),
        }
    }

    /// Creates a normalizer over the built-in table.
    pub fn builtin() -> Self {
        Self {
            table: Cow::Borrowed(CharTable::builtin()),
        }
    }

    /// Creates a normalizer over the built-in table plus the entries in `path`.
    pub fn with_extra_table(path: &Path) -> Result<Self, TableError> {
        let extra = CharTable::from_file(path)?;
        tracing::debug!(
            "Loaded {} extra conversion entries from {}",
            extra.len(),
            path.display()
        );
        Ok(Self::new(CharTable::builtin().merged(&extra)))
    }

    pub fn table(&self) -> &CharTable {
        &self.table
    }
}

impl Default for ScriptNormalizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Normalizer for ScriptNormalizer {
    fn name(&self) -> &str {
        "zh-hans"
    }

    fn normalize(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.get(c).unwrap_or(c))
            .collect()
    }
}
