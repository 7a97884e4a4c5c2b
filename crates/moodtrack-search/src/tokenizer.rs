//! Text normalization for case-insensitive matching.

/// Split text into lower-cased words.
///
/// Any run of characters that are not letters or digits is a separator;
/// empty tokens are dropped.
pub fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Analysis text prepared for tag comparison.
///
/// Only the lower-cased whole text is kept; tag phrases and tag words are
/// both matched against it as substrings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedText {
    normalized: String,
}

impl TokenizedText {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            normalized: text.to_lowercase(),
        }
    }

    /// The whole text, lower-cased.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Substring containment against the normalized text.
    ///
    /// `needle` is expected to be lower-cased already.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.normalized.contains(needle)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
