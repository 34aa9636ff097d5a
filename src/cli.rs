//! Command-line interface definition for wordlist-forge
//!
//! Provides argument parsing and validation for the wordlist generator.

use crate::output::DEFAULT_BUFFER_SIZE;
use crate::pool::DEFAULT_WORKERS;
use crate::seeds::DEFAULT_SEED_LIMIT;
use crate::synonyms::DEFAULT_SYNONYM_LIMIT;

use clap::Parser;
use std::path::PathBuf;

/// Concurrent wordlist generator for penetration testing
///
/// Harvest seed words from target content, expand them with WordNet
/// synonyms and mutate every word into thousands of candidates.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-forge",
    author = "m0h1nd4",
    version,
    about = "Concurrent wordlist generator for penetration testing",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                           WORDLIST-FORGE v1.0.0                              ║
║                      Concurrent Wordlist Generation                          ║
║                         For Penetration Testing                              ║
╚══════════════════════════════════════════════════════════════════════════════╝

Harvest seed words from a saved page or an external word-extraction tool,
expand every seed with up to 10 WordNet synonyms, and mutate each unique word
into 4120 candidates (case changes, leet, reversals, 0-2050 and !@#$ padding).

EXAMPLES:
    # Seeds from a saved HTML page
    wordlist-forge -i target.html -d /usr/share/wordnet/dict

    # Seeds from an external extractor
    wordlist-forge -x "cewl -d 1 https://target.example" -d dict/

    # Fewer workers, sorted output, keep duplicates
    wordlist-forge -i notes.txt -t 8 --sort --no-dedup -o out/list.txt
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-forge"
)]
pub struct Args {
    /// Text or HTML file to harvest seed words from
    #[arg(short, long, value_name = "PATH", required_unless_present = "extract", conflicts_with = "extract")]
    pub input: Option<PathBuf>,

    /// External word-extraction command whose stdout provides seed words
    #[arg(short = 'x', long, value_name = "CMD")]
    pub extract: Option<String>,

    /// WordNet dictionary directory (index.* and data.* files)
    #[arg(short, long, value_name = "DIR", default_value = "dict")]
    pub dict: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "forged_wordlist.txt")]
    pub output: PathBuf,

    /// Worker threads per stage
    #[arg(short = 't', long, value_name = "NUM", default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Maximum number of seed words taken from the content
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_SEED_LIMIT)]
    pub seed_limit: usize,

    /// Maximum synonyms kept per seed word
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_SYNONYM_LIMIT)]
    pub synonym_limit: usize,

    /// Disable final deduplication (keeps repeated variants)
    #[arg(long, default_value_t = false)]
    pub no_dedup: bool,

    /// Sort output alphabetically
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Buffer size for writing the output (e.g. "8MB")
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Dry run - expand synonyms and report, without mutating or writing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            extract: None,
            dict: PathBuf::from("dict"),
            output: PathBuf::from("forged_wordlist.txt"),
            threads: DEFAULT_WORKERS,
            seed_limit: DEFAULT_SEED_LIMIT,
            synonym_limit: DEFAULT_SYNONYM_LIMIT,
            no_dedup: false,
            sort: false,
            buffer_size: format!("{}B", DEFAULT_BUFFER_SIZE),
            dry_run: false,
            stats: false,
            quiet: false,
            verbose: false,
        }
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}
