//! Deduplication for word sets
//!
//! Removes repeated words while keeping the first occurrence of each in its
//! original position. Used after synonym expansion and, unless disabled, on the
//! final variant list.

use ahash::RandomState;
use hashbrown::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for deduplication operations
#[derive(Debug, Default)]
pub struct DedupStats {
    /// Total items processed
    pub total_processed: AtomicU64,
    /// Unique items found
    pub unique_count: AtomicU64,
    /// Duplicate items found
    pub duplicate_count: AtomicU64,
}

impl DedupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unique(&self) {
        self.total_processed.fetch_add(1, Ordering::Relaxed);
        self.unique_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.total_processed.fetch_add(1, Ordering::Relaxed);
        self.duplicate_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total(&self) -> u64 {
        self.total_processed.load(Ordering::Relaxed)
    }

    pub fn get_unique(&self) -> u64 {
        self.unique_count.load(Ordering::Relaxed)
    }

    pub fn get_duplicates(&self) -> u64 {
        self.duplicate_count.load(Ordering::Relaxed)
    }
}

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Check if item is unique and add it if so
    /// Returns true if the item is unique (not seen before)
    fn insert(&mut self, item: &str) -> bool;

    /// Check if item exists without adding it
    fn contains(&self, item: &str) -> bool;

    /// Get the number of items accepted so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory HashSet-based deduplicator
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn insert(&mut self, item: &str) -> bool {
        if self.set.contains(item) {
            return false;
        }
        self.set.insert(item.to_string())
    }

    fn contains(&self, item: &str) -> bool {
        self.set.contains(item)
    }

    fn len(&self) -> usize {
        self.set.len()
    }
}

/// No-op deduplicator for when deduplication is disabled
#[derive(Default)]
pub struct NoOpDeduplicator {
    count: usize,
}

impl NoOpDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deduplicator for NoOpDeduplicator {
    fn insert(&mut self, _item: &str) -> bool {
        self.count += 1;
        true // Always "unique" since we don't track
    }

    fn contains(&self, _item: &str) -> bool {
        false
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// Create the deduplicator for a run
pub fn create_deduplicator(enabled: bool, expected_items: usize) -> Box<dyn Deduplicator> {
    if enabled {
        Box::new(MemoryDeduplicator::with_capacity(expected_items))
    } else {
        Box::new(NoOpDeduplicator::new())
    }
}

/// Filter `words` through `dedup`, keeping first occurrences in order
pub fn dedup_with(words: Vec<String>, dedup: &mut dyn Deduplicator, stats: &DedupStats) -> Vec<String> {
    let mut unique = Vec::with_capacity(words.len());
    for word in words {
        if dedup.insert(&word) {
            stats.record_unique();
            unique.push(word);
        } else {
            stats.record_duplicate();
        }
    }
    unique
}

/// Remove duplicate words, preserving first-occurrence order
pub fn dedup_words(words: Vec<String>) -> Vec<String> {
    let mut dedup = MemoryDeduplicator::with_capacity(words.len());
    dedup_with(words, &mut dedup, &DedupStats::new())
}
