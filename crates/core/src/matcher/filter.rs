//! Compiled matchers.

use regex::{Regex, RegexBuilder};

use super::criterion::MatchCriterion;
use super::error::MatchError;
use crate::normalizer::Normalizer;
use crate::scanner::MatchSet;

enum Compiled {
    All,
    /// Normalized, lower-cased needle.
    Substring(String),
    Pattern(Regex),
}

/// A criterion compiled against a normalizer.
pub struct Matcher<N> {
    normalizer: N,
    compiled: Compiled,
}

impl<N: Normalizer> Matcher<N> {
    /// Compiles `criterion`. The search text is normalized first, so a
    /// Traditional-script query finds Simplified names and vice versa.
    pub fn new(criterion: &MatchCriterion, normalizer: N) -> Result<Self, MatchError> {
        let compiled = match criterion {
            MatchCriterion::Unconstrained => Compiled::All,
            MatchCriterion::Substring(text) if text.is_empty() => Compiled::All,
            MatchCriterion::Substring(text) => {
                Compiled::Substring(normalizer.normalize(text).to_lowercase())
            }
            MatchCriterion::Pattern(pattern) => {
                let normalized = normalizer.normalize(pattern);
                let regex = RegexBuilder::new(&normalized)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| MatchError::InvalidPattern {
                        pattern: pattern.clone(),
                        source: e,
                    })?;
                Compiled::Pattern(regex)
            }
        };

        Ok(Self {
            normalizer,
            compiled,
        })
    }

    /// Whether a decoded name satisfies the criterion.
    pub fn is_match(&self, decoded_name: &str) -> bool {
        match &self.compiled {
            Compiled::All => true,
            Compiled::Substring(needle) => self
                .normalizer
                .normalize(decoded_name)
                .to_lowercase()
                .contains(needle.as_str()),
            Compiled::Pattern(regex) => regex.is_match(&self.normalizer.normalize(decoded_name)),
        }
    }

    /// Returns the records whose names match, in their original order.
    /// Stored names are copied as-is, never in normalized form.
    pub fn filter(&self, full_set: &MatchSet) -> MatchSet {
        full_set
            .iter()
            .filter(|record| self.is_match(&record.decoded_name))
            .cloned()
            .collect()
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }
}

/// Compiles `criterion` and filters `full_set` in one step.
pub fn filter<N: Normalizer>(
    full_set: &MatchSet,
    criterion: &MatchCriterion,
    normalizer: N,
) -> Result<MatchSet, MatchError> {
    Ok(Matcher::new(criterion, normalizer)?.filter(full_set))
}
