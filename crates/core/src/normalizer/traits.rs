//! Trait definitions for the normalizer module.

/// Maps text to the canonical form used for comparisons.
///
/// Implementations must be deterministic and idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub trait Normalizer {
    /// Returns the name of this normalizer implementation.
    fn name(&self) -> &str;

    /// Returns the comparison form of `text`.
    fn normalize(&self, text: &str) -> String;
}

impl<N: Normalizer + ?Sized> Normalizer for &N {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn name(&self) -> &str {
        "identity"
    }

    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}
