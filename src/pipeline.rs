//! Core generation pipeline
//!
//! Seeds flow through synonym expansion, deduplication and word mutation.
//! Every stage fully drains before the next one starts, because the
//! uniqueness filter needs the complete output of the stage before it.

use crate::cli::Args;
use crate::dedup::{create_deduplicator, dedup_with, dedup_words, DedupStats};
use crate::error::{Error, Result};
use crate::lookup::LexicalLookup;
use crate::pool::{DEFAULT_WORKERS, MAX_WORKERS};
use crate::progress::{stage_progress, PipelineStats};
use crate::seeds::DEFAULT_SEED_LIMIT;
use crate::synonyms::{SynonymExpander, DEFAULT_SYNONYM_LIMIT};
use crate::transform::WordTransformer;

use rayon::prelude::*;
use std::sync::Arc;

/// Workers per available CPU above which the count is reported as oversized
const WORKERS_PER_CPU_WARNING: usize = 8;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Worker threads per stage
    pub workers: usize,
    /// Maximum number of seeds processed
    pub seed_limit: usize,
    /// Maximum synonyms kept per seed
    pub synonym_limit: usize,
    /// Deduplicate the final variant list
    pub dedup_output: bool,
    /// Sort the final list alphabetically
    pub sort_output: bool,
    /// Hide progress bars
    pub quiet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            seed_limit: DEFAULT_SEED_LIMIT,
            synonym_limit: DEFAULT_SYNONYM_LIMIT,
            dedup_output: true,
            sort_output: false,
            quiet: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Self {
            workers: args.threads,
            seed_limit: args.seed_limit,
            synonym_limit: args.synonym_limit,
            dedup_output: !args.no_dedup,
            sort_output: args.sort,
            quiet: args.quiet,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configured bounds
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(Error::InvalidConfig(format!(
                "worker count must be between 1 and {}, got {}",
                MAX_WORKERS, self.workers
            )));
        }
        if self.seed_limit == 0 {
            return Err(Error::InvalidConfig("seed limit must be at least 1".to_string()));
        }

        let recommended = num_cpus::get() * WORKERS_PER_CPU_WARNING;
        if self.workers > recommended {
            log::info!(
                "{} workers exceeds the recommended maximum of {} for this machine",
                self.workers,
                recommended
            );
        }
        Ok(())
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub seeds: usize,
    /// Synonyms emitted by the expander, repeats included
    pub synonyms: usize,
    pub unique_synonyms: usize,
    /// Variants emitted by the transformer, repeats included
    pub variants: usize,
    /// Variants dropped by final deduplication
    pub duplicates: usize,
    /// Final word list
    pub words: Vec<String>,
}

/// Main pipeline
pub struct Pipeline {
    config: PipelineConfig,
    stats: Arc<PipelineStats>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stats: Arc::new(PipelineStats::new()),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Expand seeds into their unique synonyms
    pub fn expand(&self, mut seeds: Vec<String>, lookup: &dyn LexicalLookup) -> Result<(usize, Vec<String>)> {
        self.config.validate()?;
        seeds.truncate(self.config.seed_limit);
        self.stats.add_seeds(seeds.len() as u64);

        let pb = stage_progress(seeds.len(), "Expanding synonyms...", self.config.quiet);
        let expander = SynonymExpander::new(lookup, self.config.workers, self.config.synonym_limit);
        let synonyms = expander.expand(seeds, &pb)?;
        pb.finish_and_clear();

        let emitted = synonyms.len();
        self.stats.add_synonyms(emitted as u64);

        let unique = dedup_words(synonyms);
        self.stats.add_unique_synonyms(unique.len() as u64);
        log::info!("{} synonyms, {} unique", emitted, unique.len());

        Ok((emitted, unique))
    }

    /// Run the whole pipeline over `seeds`
    pub fn run(&self, seeds: Vec<String>, lookup: &dyn LexicalLookup) -> Result<PipelineReport> {
        let seed_count = seeds.len().min(self.config.seed_limit);
        let (synonyms, unique) = self.expand(seeds, lookup)?;
        let unique_synonyms = unique.len();

        let pb = stage_progress(unique.len(), "Mutating words...", self.config.quiet);
        let transformer = WordTransformer::new(self.config.workers);
        let variants = transformer.transform(unique, &pb)?;
        pb.finish_and_clear();

        let variant_count = variants.len();
        self.stats.add_variants(variant_count as u64);
        log::info!("{} variants generated", variant_count);

        let dedup_stats = DedupStats::new();
        let mut dedup = create_deduplicator(self.config.dedup_output, variant_count);
        let mut words = dedup_with(variants, dedup.as_mut(), &dedup_stats);
        let duplicates = dedup_stats.get_duplicates() as usize;
        self.stats.add_duplicates(duplicates as u64);

        if self.config.sort_output {
            words.par_sort_unstable();
        }

        Ok(PipelineReport {
            seeds: seed_count,
            synonyms,
            unique_synonyms,
            variants: variant_count,
            duplicates,
            words,
        })
    }

    /// Get pipeline statistics
    pub fn stats(&self) -> Arc<PipelineStats> {
        Arc::clone(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MemoryLookup;
    use crate::transform::VARIANTS_PER_WORD;

    fn seeds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn config(workers: usize, dedup_output: bool) -> PipelineConfig {
        PipelineConfig {
            workers,
            dedup_output,
            quiet: true,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_default_config_matches_cli_defaults() {
        let from_cli = PipelineConfig::from_args(&crate::cli::Args::default()).unwrap();
        assert_eq!(from_cli, PipelineConfig::default());
        assert!(!PipelineConfig::default().quiet);
    }

    #[test]
    fn test_no_synonyms_gives_empty_output() {
        let pipeline = Pipeline::new(config(DEFAULT_WORKERS, true));
        let report = pipeline.run(seeds(&["secure"]), &MemoryLookup::new()).unwrap();

        assert_eq!(report.seeds, 1);
        assert_eq!(report.unique_synonyms, 0);
        assert!(report.words.is_empty());
    }

    #[test]
    fn test_exact_variant_count_without_dedup() {
        let lookup = MemoryLookup::new()
            .with_entry("secure", [vec!["secure", "safe"]])
            .with_entry("guard", [vec!["guard", "safe"]]);
        let pipeline = Pipeline::new(config(4, false));
        let report = pipeline.run(seeds(&["secure", "guard"]), &lookup).unwrap();

        assert_eq!(report.synonyms, 4);
        assert_eq!(report.unique_synonyms, 3);
        assert_eq!(report.variants, 3 * VARIANTS_PER_WORD);
        assert_eq!(report.words.len(), 3 * VARIANTS_PER_WORD);
        assert_eq!(report.duplicates, 0);
    }

    #[test]
    fn test_final_dedup_removes_collisions() {
        // "Admin" yields "ADMIN" and "Admin" twice each among its case variants
        let lookup = MemoryLookup::new().with_entry("admin", [vec!["Admin"]]);
        let pipeline = Pipeline::new(config(2, true));
        let report = pipeline.run(seeds(&["admin"]), &lookup).unwrap();

        assert_eq!(report.variants, VARIANTS_PER_WORD);
        assert_eq!(report.words.len() + report.duplicates, VARIANTS_PER_WORD);
        assert_eq!(report.duplicates, 2);

        let mut unique = report.words.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), report.words.len());
    }

    #[test]
    fn test_pool_size_does_not_change_output_set() {
        let lookup = MemoryLookup::new()
            .with_entry("login", [vec!["login", "logon"], vec!["log-in"]])
            .with_entry("portal", [vec!["portal", "gate", "gateway"]]);
        let input = seeds(&["login", "portal", "unknown"]);

        let mut single = Pipeline::new(config(1, true)).run(input.clone(), &lookup).unwrap().words;
        let mut many = Pipeline::new(config(50, true)).run(input, &lookup).unwrap().words;
        single.sort();
        many.sort();
        assert_eq!(single, many);
    }

    #[test]
    fn test_sorted_output() {
        let lookup = MemoryLookup::new().with_entry("root", [vec!["root", "beginning"]]);
        let pipeline = Pipeline::new(PipelineConfig {
            sort_output: true,
            ..PipelineConfig::default()
        });
        let words = pipeline.run(seeds(&["root"]), &lookup).unwrap().words;

        let mut sorted = words.clone();
        sorted.sort_unstable();
        assert_eq!(words, sorted);
        assert!(words.contains(&"r007".to_string()));
    }

    #[test]
    fn test_seed_limit_applied() {
        let lookup = MemoryLookup::new()
            .with_entry("first", [vec!["alpha"]])
            .with_entry("second", [vec!["beta"]]);
        let pipeline = Pipeline::new(PipelineConfig {
            seed_limit: 1,
            ..PipelineConfig::default()
        });
        let report = pipeline.run(seeds(&["first", "second"]), &lookup).unwrap();

        assert_eq!(report.seeds, 1);
        assert_eq!(report.unique_synonyms, 1);
        assert!(report.words.contains(&"alpha".to_string()));
        assert!(!report.words.contains(&"beta".to_string()));
    }

    #[test]
    fn test_stats_track_run() {
        let lookup = MemoryLookup::new().with_entry("key", [vec!["key", "cay"]]);
        let pipeline = Pipeline::new(config(2, false));
        pipeline.run(seeds(&["key"]), &lookup).unwrap();

        let stats = pipeline.stats();
        assert_eq!(stats.get_seeds(), 1);
        assert_eq!(stats.get_synonyms(), 2);
        assert_eq!(stats.get_unique_synonyms(), 2);
        assert_eq!(stats.get_variants(), 2 * VARIANTS_PER_WORD as u64);
    }

    #[test]
    fn test_invalid_worker_count() {
        for workers in [0, MAX_WORKERS + 1] {
            let pipeline = Pipeline::new(config(workers, true));
            let err = pipeline.run(seeds(&["x"]), &MemoryLookup::new()).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)));
        }
    }
}
