//! Wordlist Forge - Concurrent wordlist generation for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordlist_forge::cli::Args;
use wordlist_forge::error::Error;
use wordlist_forge::output::write_wordlist;
use wordlist_forge::pipeline::{Pipeline, PipelineConfig};
use wordlist_forge::progress::{
    format_number, print_banner, print_bullet, print_error, print_header, print_info, print_success,
    print_warning,
};
use wordlist_forge::seeds::{CommandSeedSource, FileSeedSource, SeedSource};
use wordlist_forge::transform::WordTransformer;
use wordlist_forge::wordnet::WordNet;

use bytesize::ByteSize;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if args.quiet {
        std::env::set_var("RUST_LOG", "error");
    } else if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        if e.downcast_ref::<Error>().is_some_and(Error::is_startup) {
            print_info("Nothing was generated; check the dictionary path and options");
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    let config = PipelineConfig::from_args(&args)?;
    let buffer_size = args.parse_buffer_size()?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    // The dictionary is loaded before any worker starts; failure aborts the run
    if !args.quiet {
        print_header("Loading dictionary...");
    }
    let wordnet = WordNet::load(&args.dict)?;
    if !args.quiet {
        print_info(&format!(
            "{} lemmas, {} synsets",
            format_number(wordnet.lemma_count() as u64),
            format_number(wordnet.synset_count() as u64)
        ));
    }

    let source = seed_source(&args, config.seed_limit)?;
    if !args.quiet {
        print_header("Harvesting seed words...");
        print_info(&format!("Source: {}", source.name()));
    }
    let seeds = source.seeds()?;
    if !args.quiet {
        print_info(&format!("Seed words: {}", seeds.len()));
    }
    if seeds.is_empty() {
        print_warning("No seed words found; the wordlist will be empty");
    }

    let pipeline = Pipeline::new(config);

    if args.dry_run {
        return dry_run_report(&pipeline, seeds, &wordnet, &args);
    }

    if !args.quiet {
        print_header("Generating wordlist...");
    }
    let report = pipeline.run(seeds, &wordnet)?;
    if !args.quiet {
        print_info(&format!("After adding synonyms: {}", format_number(report.unique_synonyms as u64)));
        print_info(&format!("After mutation: {}", format_number(report.variants as u64)));
    }

    let summary = write_wordlist(&args.output, &report.words, buffer_size)?;
    pipeline.stats().record_output(summary.lines, summary.bytes);

    if !args.quiet {
        print_success(&format!("Wordlist saved to {:?}", summary.path));
        print_info(&format!(
            "{} words ({})",
            format_number(summary.lines),
            ByteSize(summary.bytes)
        ));
    }

    if args.stats && !args.quiet {
        pipeline.stats().print_summary();
    }

    Ok(())
}

/// Pick the seed source from the arguments
fn seed_source(args: &Args, limit: usize) -> anyhow::Result<Box<dyn SeedSource>> {
    match (&args.input, &args.extract) {
        (Some(path), None) => {
            if !path.exists() {
                anyhow::bail!("Input path does not exist: {:?}", path);
            }
            Ok(Box::new(FileSeedSource::new(path.clone(), limit)))
        }
        (None, Some(command)) => Ok(Box::new(CommandSeedSource::from_command_line(command, limit)?)),
        _ => anyhow::bail!("Exactly one seed source must be given: --input or --extract"),
    }
}

/// Expand synonyms and report what a full run would produce
fn dry_run_report(pipeline: &Pipeline, seeds: Vec<String>, wordnet: &WordNet, args: &Args) -> anyhow::Result<()> {
    print_header("DRY RUN - No files will be written");

    let (synonyms, unique) = pipeline.expand(seeds, wordnet)?;

    print_bullet(&format!("Synonyms found: {}", format_number(synonyms as u64)));
    print_bullet(&format!("Unique synonyms: {}", format_number(unique.len() as u64)));
    print_bullet(&format!(
        "Variants to generate: {}",
        format_number(WordTransformer::expected_variants(unique.len()) as u64)
    ));
    print_bullet(&format!("Output file: {:?}", args.output));
    print_bullet(&format!(
        "Deduplication: {}",
        if pipeline.config().dedup_output { "enabled" } else { "disabled" }
    ));

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &PipelineConfig) {
    print_header("Configuration");

    match (&args.input, &args.extract) {
        (Some(path), _) => print_info(&format!("Input:         {:?}", path)),
        (_, Some(command)) => print_info(&format!("Extractor:     {}", command)),
        _ => {}
    }
    print_info(&format!("Dictionary:    {:?}", args.dict));
    print_info(&format!("Output:        {:?}", args.output));
    print_info(&format!("Workers:       {}", config.workers));
    print_info(&format!("Seed limit:    {}", config.seed_limit));
    print_info(&format!("Synonym limit: {}", config.synonym_limit));
    print_info(&format!("Dedup:         {}", config.dedup_output));
    print_info(&format!("Sort:          {}", config.sort_output));
    print_info(&format!("CPUs:          {}", num_cpus::get()));
}
