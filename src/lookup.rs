//! Synonym lookup interface
//!
//! The synonym expander only needs a ranked "word to synonym groups" query.
//! Implementations are loaded once and then shared read-only between workers.

use ahash::RandomState;
use hashbrown::HashMap;

/// One ranked cluster of related words
pub type SynonymGroup = Vec<String>;

/// Read-only synonym dictionary
pub trait LexicalLookup: Send + Sync {
    /// Ranked synonym groups for `word`; empty when the word is unknown
    fn search(&self, word: &str) -> Vec<SynonymGroup>;
}

/// Dictionary held entirely in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryLookup {
    entries: HashMap<String, Vec<SynonymGroup>, RandomState>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the ranked groups for a word, replacing any earlier entry
    pub fn insert<I, G, S>(&mut self, word: &str, groups: I)
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups = groups
            .into_iter()
            .map(|g| g.into_iter().map(Into::into).collect())
            .collect();
        self.entries.insert(word.to_string(), groups);
    }

    /// Builder form of [`MemoryLookup::insert`]
    pub fn with_entry<I, G, S>(mut self, word: &str, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(word, groups);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexicalLookup for MemoryLookup {
    fn search(&self, word: &str) -> Vec<SynonymGroup> {
        self.entries.get(word).cloned().unwrap_or_default()
    }
}
