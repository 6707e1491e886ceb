//! Match criteria.

use serde::{Deserialize, Serialize};

/// What a torrent name has to satisfy to be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum MatchCriterion {
    /// Every torrent matches (list-all mode).
    Unconstrained,
    /// Case-insensitive containment.
    Substring(String),
    /// Case-insensitive regular expression search.
    Pattern(String),
}

impl MatchCriterion {
    /// Builds a criterion from optional search text.
    ///
    /// Absent or empty text selects everything, whichever mode is asked for.
    pub fn from_query(text: Option<&str>, use_regex: bool) -> Self {
        match text {
            None | Some("") => Self::Unconstrained,
            Some(text) if use_regex => Self::Pattern(text.to_string()),
            Some(text) => Self::Substring(text.to_string()),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }

    /// The raw search text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Unconstrained => None,
            Self::Substring(text) | Self::Pattern(text) => Some(text),
        }
    }
}

impl Default for MatchCriterion {
    fn default() -> Self {
        Self::Unconstrained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        assert_eq!(MatchCriterion::from_query(None, false), MatchCriterion::Unconstrained);
        assert_eq!(MatchCriterion::from_query(Some(""), true), MatchCriterion::Unconstrained);
        assert_eq!(
            MatchCriterion::from_query(Some("foo"), false),
            MatchCriterion::Substring("foo".to_string())
        );
        assert_eq!(
            MatchCriterion::from_query(Some("^foo"), true),
            MatchCriterion::Pattern("^foo".to_string())
        );
    }

    #[test]
    fn test_text() {
        assert_eq!(MatchCriterion::Unconstrained.text(), None);
        assert_eq!(MatchCriterion::Pattern("a+".to_string()).text(), Some("a+"));
        assert!(MatchCriterion::default().is_unconstrained());
    }
}
