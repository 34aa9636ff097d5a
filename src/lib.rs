//! # Wordlist Forge
//!
//! Concurrent wordlist generator for penetration testing.
//!
//! ## Features
//!
//! - **Seed harvesting**: Words from a saved page (text or HTML) or from an external extractor
//! - **Synonym expansion**: Up to 10 ranked WordNet synonyms per seed, looked up by a worker pool
//! - **Mutation**: 4120 variants per word (case, leet, reversal, numeric and symbol padding)
//! - **Deduplication**: Order-preserving removal of repeated words
//! - **Parallel processing**: Two bounded worker pools joined by rendezvous channels
//!
//! ## Usage
//!
//! ```bash
//! # Seeds from a saved page
//! wordlist-forge -i target.html -d /usr/share/wordnet/dict
//!
//! # Seeds from an external word-extraction tool
//! wordlist-forge -x "cewl -d 1 https://target.example"
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_forge::lookup::MemoryLookup;
//! use wordlist_forge::pipeline::{Pipeline, PipelineConfig};
//!
//! let lookup = MemoryLookup::new().with_entry("secure", [vec!["secure", "safe"]]);
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let report = pipeline.run(vec!["secure".to_string()], &lookup).unwrap();
//! assert!(report.words.contains(&"s3cur3".to_string()));
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod lookup;
pub mod output;
pub mod pipeline;
pub mod pool;
pub mod progress;
pub mod seeds;
pub mod stopwords;
pub mod synonyms;
pub mod transform;
pub mod wordnet;

pub use cli::Args;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport};
