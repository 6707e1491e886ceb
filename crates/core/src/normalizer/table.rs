//! Character conversion tables.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::error::TableError;

static BUILTIN_SOURCE: &str = include_str!("../../data/t2s.txt");

static BUILTIN: Lazy<CharTable> = Lazy::new(|| {
    CharTable::parse(BUILTIN_SOURCE).unwrap_or_else(|e| {
        tracing::error!("Built-in conversion table is invalid: {}", e);
        CharTable::default()
    })
});

/// A one-to-one character mapping.
///
/// Chains are collapsed when the table is built (`A→B` plus `B→C` stores
/// `A→C`) and cyclic entries are dropped, so no output character is ever
/// itself a key. That makes lookups idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharTable {
    map: HashMap<char, char>,
}

impl CharTable {
    /// The Traditional → Simplified table compiled into the crate.
    pub fn builtin() -> &'static CharTable {
        &BUILTIN
    }

    /// Parses a table from its text form.
    ///
    /// Tokens are two characters, `<from><to>`, separated by whitespace.
    /// Everything after `#` on a line is ignored. When a source character
    /// repeats, the later entry wins.
    pub fn parse(source: &str) -> Result<Self, TableError> {
        let mut raw = HashMap::new();

        for (idx, line) in source.lines().enumerate() {
            let content = line.split('#').next().unwrap_or_default();
            for token in content.split_whitespace() {
                let mut chars = token.chars();
                match (chars.next(), chars.next(), chars.next()) {
                    (Some(from), Some(to), None) => {
                        raw.insert(from, to);
                    }
                    _ => {
                        return Err(TableError::InvalidEntry {
                            line: idx + 1,
                            token: token.to_string(),
                        })
                    }
                }
            }
        }

        Ok(Self {
            map: resolve(&raw),
        })
    }

    /// Reads and parses a table file.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let source = std::fs::read_to_string(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&source)
    }

    /// Returns a new table with `overrides` layered over `self`.
    pub fn merged(&self, overrides: &CharTable) -> CharTable {
        let mut raw = self.map.clone();
        raw.extend(overrides.map.iter().map(|(&k, &v)| (k, v)));
        Self {
            map: resolve(&raw),
        }
    }

    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(from, to)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.map.iter().map(|(&k, &v)| (k, v))
    }
}

/// Collapses chains so every target is a fixed point; drops cycles.
fn resolve(raw: &HashMap<char, char>) -> HashMap<char, char> {
    let mut resolved = HashMap::with_capacity(raw.len());

    'entries: for (&from, &to) in raw {
        let mut seen = HashSet::from([from]);
        let mut target = to;
        while let Some(&next) = raw.get(&target) {
            if !seen.insert(target) {
                tracing::debug!("Dropping cyclic conversion entry {}{}", from, to);
                continue 'entries;
            }
            target = next;
        }
        if target != from {
            resolved.insert(from, target);
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = CharTable::parse("# comment\n樣样 本本\n\n國国 # trailing").unwrap();
        assert_eq!(table.get('樣'), Some('样'));
        assert_eq!(table.get('國'), Some('国'));
        // identity entries carry no information
        assert_eq!(table.get('本'), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_invalid_entry() {
        let err = CharTable::parse("樣样\n國国x").unwrap_err();
        match err {
            TableError::InvalidEntry { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "國国x");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            CharTable::parse("樣"),
            Err(TableError::InvalidEntry { line: 1, .. })
        ));
    }

    #[test]
    fn test_chains_are_collapsed() {
        let table = CharTable::parse("ab bc cd").unwrap();
        assert_eq!(table.get('a'), Some('d'));
        assert_eq!(table.get('b'), Some('d'));
        assert_eq!(table.get('c'), Some('d'));
        assert_eq!(table.get('d'), None);
    }

    #[test]
    fn test_cycles_are_dropped() {
        let table = CharTable::parse("ab ba xy").unwrap();
        assert_eq!(table.get('a'), None);
        assert_eq!(table.get('b'), None);
        assert_eq!(table.get('x'), Some('y'));
    }

    #[test]
    fn test_later_entry_wins() {
        let table = CharTable::parse("ab\nac").unwrap();
        assert_eq!(table.get('a'), Some('c'));
    }

    #[test]
    fn test_merged_overrides() {
        let base = CharTable::parse("ab cd").unwrap();
        let extra = CharTable::parse("ax ef").unwrap();
        let merged = base.merged(&extra);
        assert_eq!(merged.get('a'), Some('x'));
        assert_eq!(merged.get('c'), Some('d'));
        assert_eq!(merged.get('e'), Some('f'));
    }

    #[test]
    fn test_builtin_table_is_valid() {
        // parse the raw resource directly so a bad entry fails loudly here
        let table = CharTable::parse(BUILTIN_SOURCE).unwrap();
        assert!(table.len() > 500);
        assert_eq!(&table, CharTable::builtin());
    }

    #[test]
    fn test_builtin_targets_are_fixed_points() {
        let table = CharTable::builtin();
        for (from, to) in table.iter() {
            assert_ne!(from, to);
            assert_eq!(table.get(to), None, "{from}{to} maps onto another key");
        }
    }

    #[test]
    fn test_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("extra.txt");
        std::fs::write(&path, "臺台\n").unwrap();
        let table = CharTable::from_file(&path).unwrap();
        assert_eq!(table.get('臺'), Some('台'));

        let missing = CharTable::from_file(&temp.path().join("missing.txt"));
        assert!(matches!(missing, Err(TableError::Io { .. })));
    }
}
