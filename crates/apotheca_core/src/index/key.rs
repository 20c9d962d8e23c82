//! Case-insensitive name key.

use std::cmp::Ordering;
use std::fmt;

/// A string key that compares case-insensitively.
///
/// `NameKey` keeps the original spelling for display and a lowercase-folded
/// form for comparison. Two keys are equal iff their folded forms are equal,
/// so `"Amox"` and `"amox"` are the same key as far as ordering is concerned.
///
/// Fixing case handling in the key type (rather than at each comparison site)
/// means an index keyed by `NameKey` can never mix folded and unfolded
/// comparisons.
#[derive(Debug, Clone)]
pub struct NameKey {
    raw: String,
    folded: String,
}

impl NameKey {
    /// Creates a name key from a display name.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// Returns the original spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the folded form used for comparison.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for NameKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for NameKey {}

impl PartialOrd for NameKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NameKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl From<&str> for NameKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for NameKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
