//! Types for the scanner module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A decoded torrent file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Path relative to the search root, always starting with `./`.
    pub relative_path: String,
    /// The `info.name` field exactly as stored in the file.
    pub decoded_name: String,
    /// Location the file was read from. Empty when the record was not
    /// produced by a scan; `relative_path` is then resolved against the root.
    #[serde(skip)]
    pub source: PathBuf,
}

impl TorrentRecord {
    pub fn new(relative_path: impl Into<String>, decoded_name: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            decoded_name: decoded_name.into(),
            source: PathBuf::new(),
        }
    }

    /// Sets the on-disk location of the file.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }
}

/// Insertion-ordered map of relative path → decoded name.
///
/// Keys are unique; inserting an existing key replaces its name in place
/// without moving it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    records: Vec<TorrentRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the previous one for the same path.
    pub fn insert(&mut self, record: TorrentRecord) -> Option<TorrentRecord> {
        match self.index.get(&record.relative_path) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index
                    .insert(record.relative_path.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Returns the decoded name stored for `relative_path`.
    pub fn get(&self, relative_path: &str) -> Option<&str> {
        self.index
            .get(relative_path)
            .map(|&pos| self.records[pos].decoded_name.as_str())
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.index.contains_key(relative_path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TorrentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TorrentRecord] {
        &self.records
    }
}

impl PartialEq for MatchSet {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for MatchSet {}

impl FromIterator<TorrentRecord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = TorrentRecord>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl IntoIterator for MatchSet {
    type Item = TorrentRecord;
    type IntoIter = std::vec::IntoIter<TorrentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a TorrentRecord;
    type IntoIter = std::slice::Iter<'a, TorrentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A file that was found but left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    /// Path relative to the search root.
    pub relative_path: String,
    /// Why the file was skipped.
    pub reason: String,
}

/// Traversal options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into symlinked directories. Symlinked files are always read.
    pub follow_links: bool,
}

/// Everything a scan produced.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The root that was scanned.
    pub root: PathBuf,
    /// Successfully decoded torrents in traversal order.
    pub records: MatchSet,
    /// Torrent files (or directories) that could not be read.
    pub failures: Vec<ScanFailure>,
}
