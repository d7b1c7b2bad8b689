//! Optional dictionary of accepted words.

use rustc_hash::FxHashSet;

/// Set of accepted words, stored upper-case.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: FxHashSet<String>,
}

impl WordList {
    /// Build from any iterator of words. Case is ignored; blank lines are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a newline-separated word list.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Whether `word` is accepted.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
