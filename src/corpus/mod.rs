//! Word corpus module
//!
//! The corpus is loaded once from a [`CorpusSource`] and then shared
//! read-only by every query.

pub mod cache;
pub mod source;

pub use cache::CorpusCache;
pub use source::{CorpusSource, FileSource, HttpSource, DEFAULT_WORD_LIST_URL};

use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, immutable list of lowercase words.
///
/// Cloning is cheap; clones share the same storage.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Arc<[String]>,
}

impl Corpus {
    /// Build from any word iterator, normalizing to lowercase.
    ///
    /// Blank entries are skipped and repeated words keep their first position.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect();

        Self {
            words: words.into(),
        }
    }

    /// Parse whitespace/newline delimited text, one word per token
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.split_whitespace())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| *w == word)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_newline_delimited() {
        let corpus = Corpus::parse("the\nof\r\nand\n\n  to \n");
        assert_eq!(corpus.words(), &["the", "of", "and", "to"]);
    }

    #[test]
    fn test_normalizes_case_and_dedups() {
        let corpus = Corpus::from_words(["Apple", "apple", "Tree", "APPLE", "egg"]);
        assert_eq!(corpus.words(), &["apple", "tree", "egg"]);
        assert!(corpus.contains("TREE"));
        assert!(!corpus.contains("zebra"));
    }

    #[test]
    fn test_clone_shares_storage() {
        let corpus = Corpus::parse("one two three");
        let clone = corpus.clone();
        assert!(std::ptr::eq(corpus.words().as_ptr(), clone.words().as_ptr()));
    }

    #[test]
    fn test_empty_input() {
        let corpus = Corpus::parse("   \n\n");
        assert!(corpus.is_empty());
        assert_eq!(corpus.len(), 0);
    }
}
