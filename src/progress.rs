//! Progress display module
//!
//! Styled status lines, per-stage progress bars and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██╗    ██╗ ██████╗ ██████╗ ██████╗ ██╗     ██╗███████╗████████╗            ║
║   ██║    ██║██╔═══██╗██╔══██╗██╔══██╗██║     ██║██╔════╝╚══██╔══╝            ║
║   ██║ █╗ ██║██║   ██║██████╔╝██║  ██║██║     ██║███████╗   ██║               ║
║   ██║███╗██║██║   ██║██╔══██╗██║  ██║██║     ██║╚════██║   ██║               ║
║   ╚███╔███╔╝╚██████╔╝██║  ██║██████╔╝███████╗██║███████║   ██║               ║
║    ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝╚══════╝   ╚═╝               ║
║                                                                              ║
║   ███████╗ ██████╗ ██████╗  ██████╗ ███████╗                                 ║
║   ██╔════╝██╔═══██╗██╔══██╗██╔════╝ ██╔════╝                                 ║
║   █████╗  ██║   ██║██████╔╝██║  ███╗█████╗                                   ║
║   ██╔══╝  ██║   ██║██╔══██╗██║   ██║██╔══╝                                   ║
║   ██║     ╚██████╔╝██║  ██║╚██████╔╝███████╗                                 ║
║   ╚═╝      ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝                                 ║
║                                                                              ║
║                        Concurrent Wordlist Generation                        ║
║                           For Penetration Testing                            ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Progress bar for one pipeline stage, hidden in quiet mode
pub fn stage_progress(total: usize, msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar(total as u64, msg)
    }
}

/// Pipeline statistics
#[derive(Debug)]
pub struct PipelineStats {
    pub seeds: AtomicU64,
    pub synonyms: AtomicU64,
    pub unique_synonyms: AtomicU64,
    pub variants: AtomicU64,
    pub duplicates: AtomicU64,
    pub output_lines: AtomicU64,
    pub output_bytes: AtomicU64,
    pub start_time: Instant,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            seeds: AtomicU64::new(0),
            synonyms: AtomicU64::new(0),
            unique_synonyms: AtomicU64::new(0),
            variants: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            output_lines: AtomicU64::new(0),
            output_bytes: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn add_seeds(&self, count: u64) {
        self.seeds.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_synonyms(&self, count: u64) {
        self.synonyms.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_unique_synonyms(&self, count: u64) {
        self.unique_synonyms.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_variants(&self, count: u64) {
        self.variants.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_duplicates(&self, count: u64) {
        self.duplicates.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_output(&self, lines: u64, bytes: u64) {
        self.output_lines.fetch_add(lines, Ordering::Relaxed);
        self.output_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_seeds(&self) -> u64 {
        self.seeds.load(Ordering::Relaxed)
    }

    pub fn get_synonyms(&self) -> u64 {
        self.synonyms.load(Ordering::Relaxed)
    }

    pub fn get_unique_synonyms(&self) -> u64 {
        self.unique_synonyms.load(Ordering::Relaxed)
    }

    pub fn get_variants(&self) -> u64 {
        self.variants.load(Ordering::Relaxed)
    }

    pub fn get_duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    pub fn get_output_lines(&self) -> u64 {
        self.output_lines.load(Ordering::Relaxed)
    }

    pub fn get_output_bytes(&self) -> u64 {
        self.output_bytes.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn variants_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_variants() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    GENERATION COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Seed words:     ".green(), format_number(self.get_seeds()));
        println!("  {} {}", "Synonyms:       ".green(), format_number(self.get_synonyms()));
        println!("  {} {}", "Unique synonyms:".green(), format_number(self.get_unique_synonyms()));
        println!("  {} {}", "Variants:       ".green(), format_number(self.get_variants()));
        println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.get_duplicates()));
        println!(
            "  {} {}",
            "Words written:  ".green().bold(),
            format_number(self.get_output_lines()).green().bold()
        );
        println!("  {} {}", "Output size:    ".green(), ByteSize(self.get_output_bytes()));

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} variants/sec", "Throughput:     ".green(), self.variants_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(4120), "4,120");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_stats() {
        let stats = PipelineStats::new();

        stats.add_seeds(3);
        stats.add_synonyms(2);
        stats.add_unique_synonyms(1);
        stats.add_variants(1);
        stats.add_duplicates(7);
        stats.record_output(10, 80);

        assert_eq!(stats.get_seeds(), 3);
        assert_eq!(stats.get_synonyms(), 2);
        assert_eq!(stats.get_unique_synonyms(), 1);
        assert_eq!(stats.get_variants(), 1);
        assert_eq!(stats.get_duplicates(), 7);
        assert_eq!(stats.get_output_lines(), 10);
        assert_eq!(stats.get_output_bytes(), 80);
    }

    #[test]
    fn test_quiet_stage_progress_is_hidden() {
        let pb = stage_progress(10, "Expanding", true);
        assert!(pb.is_hidden());
    }
}
