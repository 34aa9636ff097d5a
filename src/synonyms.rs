//! Synonym expansion stage
//!
//! Every seed word is looked up in the shared dictionary by a pool of workers.
//! Each seed contributes at most `limit` distinct synonyms, taken in rank
//! order, which keeps the total volume bounded however prolific a seed is.

use crate::dedup::dedup_words;
use crate::error::Result;
use crate::lookup::LexicalLookup;
use crate::pool::{run_stage, Emitter};

use indicatif::ProgressBar;

/// Default number of synonyms kept per seed
pub const DEFAULT_SYNONYM_LIMIT: usize = 10;

/// Ranked, locally deduplicated synonyms of one seed, capped at `limit`
pub fn expand_seed(lookup: &dyn LexicalLookup, seed: &str, limit: usize) -> Vec<String> {
    let candidates: Vec<String> = lookup
        .search(seed)
        .into_iter()
        .flatten()
        .filter(|word| !word.is_empty())
        .collect();

    let mut unique = dedup_words(candidates);
    unique.truncate(limit);
    unique
}

/// Worker pool mapping seeds to their synonyms
pub struct SynonymExpander<'a> {
    lookup: &'a dyn LexicalLookup,
    workers: usize,
    limit: usize,
}

impl<'a> SynonymExpander<'a> {
    pub fn new(lookup: &'a dyn LexicalLookup, workers: usize, limit: usize) -> Self {
        Self {
            lookup,
            workers,
            limit,
        }
    }

    /// Expand all seeds; the result may repeat words found for several seeds
    pub fn expand(&self, seeds: Vec<String>, progress: &ProgressBar) -> Result<Vec<String>> {
        let lookup = self.lookup;
        let limit = self.limit;

        run_stage(
            "synonym",
            seeds,
            self.workers,
            progress,
            |seed: String, out: &Emitter<'_, String>| {
                let synonyms = expand_seed(lookup, &seed, limit);
                if synonyms.is_empty() {
                    log::trace!("No synonyms for '{}'", seed);
                }
                for word in synonyms {
                    if !out.emit(word) {
                        return;
                    }
                }
            },
            |_| {},
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MemoryLookup;

    fn lookup() -> MemoryLookup {
        MemoryLookup::new()
            .with_entry("secure", [vec!["secure", "safe", ""], vec!["safe", "fasten", "procure"]])
            .with_entry("key", [vec!["key", "cay"], vec!["key", "central"]])
            .with_entry(
                "many",
                [
                    vec!["a1", "a2", "a3", "a4", "a5", "a6"],
                    vec!["a5", "a6", "a7", "a8", "a9", "a10", "a11", "a12"],
                ],
            )
    }

    #[test]
    fn test_expand_seed_flattens_and_dedups() {
        let lookup = lookup();
        assert_eq!(
            expand_seed(&lookup, "secure", 10),
            vec!["secure", "safe", "fasten", "procure"]
        );
    }

    #[test]
    fn test_expand_seed_cap() {
        let lookup = lookup();
        let synonyms = expand_seed(&lookup, "many", DEFAULT_SYNONYM_LIMIT);
        assert_eq!(synonyms.len(), 10);
        assert_eq!(synonyms[0], "a1");
        assert_eq!(synonyms[9], "a10");
    }

    #[test]
    fn test_unknown_seed_contributes_nothing() {
        let lookup = lookup();
        assert!(expand_seed(&lookup, "xyzzy", 10).is_empty());
    }

    #[test]
    fn test_pool_sizes_agree() {
        let lookup = lookup();
        let seeds: Vec<String> = ["secure", "key", "many", "xyzzy", "secure"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let pb = ProgressBar::hidden();

        let mut single = SynonymExpander::new(&lookup, 1, 10).expand(seeds.clone(), &pb).unwrap();
        let mut many = SynonymExpander::new(&lookup, 50, 10).expand(seeds, &pb).unwrap();
        single.sort();
        many.sort();

        // secure twice (4 each), key (3), many (10)
        assert_eq!(single.len(), 21);
        assert_eq!(single, many);
    }

    #[test]
    fn test_single_worker_keeps_rank_order() {
        let lookup = lookup();
        let pb = ProgressBar::hidden();
        let out = SynonymExpander::new(&lookup, 1, 10)
            .expand(vec!["key".to_string()], &pb)
            .unwrap();
        assert_eq!(out, vec!["key", "cay", "central"]);
    }
}
