//! Seed word acquisition
//!
//! Seeds come either from a local text/HTML file or from the stdout of an
//! external word-extraction command. Both paths share the same cleaning rules
//! and seed limit.

use crate::encoding::{decode_bytes, read_text};
use crate::error::{Error, Result};
use crate::stopwords::is_stopword;

use html2text::render::TrivialDecorator;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;

/// Default number of seed words taken from the target content
pub const DEFAULT_SEED_LIMIT: usize = 300;

/// Tokens of this many characters or fewer are discarded
const MIN_SEED_CHARS: usize = 3;

/// Line width handed to the HTML renderer; wide enough that words are never split
const RENDER_WIDTH: usize = 4096;

/// Source of seed words
pub trait SeedSource {
    /// Human-readable description for status output
    fn name(&self) -> String;

    /// Produce the ordered seed words
    fn seeds(&self) -> Result<Vec<String>>;
}

/// Seeds read from a local text or HTML file
pub struct FileSeedSource {
    path: PathBuf,
    limit: usize,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }
}

impl SeedSource for FileSeedSource {
    fn name(&self) -> String {
        format!("file {:?}", self.path)
    }

    fn seeds(&self) -> Result<Vec<String>> {
        let text = read_text(&self.path)?;
        extract_seeds(&text, self.limit)
    }
}

/// Seeds read from the stdout of an external word-extraction tool
pub struct CommandSeedSource {
    program: String,
    args: Vec<String>,
    limit: usize,
}

impl CommandSeedSource {
    pub fn new(program: impl Into<String>, args: Vec<String>, limit: usize) -> Self {
        Self {
            program: program.into(),
            args,
            limit,
        }
    }

    /// Build from a whitespace-separated command line, e.g. `"cewl -d 1 https://target"`
    pub fn from_command_line(command_line: &str, limit: usize) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::InvalidConfig("extractor command is empty".to_string()))?;
        Ok(Self::new(program, parts.collect(), limit))
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SeedSource for CommandSeedSource {
    fn name(&self) -> String {
        format!("command '{}'", self.command_line())
    }

    fn seeds(&self) -> Result<Vec<String>> {
        log::debug!("Running extractor: {}", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| Error::ExtractorFailed {
                command: self.command_line(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExtractorFailed {
                command: self.command_line(),
                reason: format!("{} {}", output.status, stderr.trim()),
            });
        }

        let text = decode_bytes(&output.stdout);
        extract_seeds(&text, self.limit)
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    // Patterns are literals below; a failure here is a programming error
    cell.get_or_init(|| Regex::new(pattern).expect("invalid built-in pattern"))
}

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"<[A-Za-z!/?]")
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^\d+$")
}

/// Render HTML to its visible text
///
/// Scripts, styles, comments and attribute values are dropped and character
/// references are decoded. Link targets are not rendered.
pub fn html_to_text(html: &str) -> Result<String> {
    html2text::from_read_with_decorator(html.as_bytes(), RENDER_WIDTH, TrivialDecorator::new())
        .map_err(|e| Error::Markup(e.to_string()))
}

fn looks_like_markup(text: &str) -> bool {
    markup_re().is_match(text)
}

/// Turn raw page text into at most `limit` seed words
pub fn extract_seeds(text: &str, limit: usize) -> Result<Vec<String>> {
    let text = if looks_like_markup(text) {
        html_to_text(text)?
    } else {
        text.to_string()
    };
    let text = text.replace('.', " ").to_lowercase();

    Ok(text
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_' || c == '\''))
        .map(|token| token.trim_matches(|c: char| c == '-' || c == '_' || c == '\''))
        .filter(|token| token.chars().count() > MIN_SEED_CHARS)
        .filter(|token| !digits_re().is_match(token))
        .filter(|token| !is_stopword(token))
        .take(limit)
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extract_plain_text() {
        let seeds = extract_seeds("Secure your Banking. Login with 2050 passwords, then relax!", 300).unwrap();
        assert_eq!(seeds, vec!["secure", "banking", "login", "passwords", "relax"]);
    }

    #[test]
    fn test_extract_html() {
        let html = r#"<html><head><style>body { color: red; }</style>
            <script>var token = "abcdef";</script></head>
            <body><h1>Admin&nbsp;Portal</h1><p class="x">Corporate   intranet.gateway</p>
            <!-- hidden comment --></body></html>"#;
        let seeds = extract_seeds(html, 300).unwrap();
        assert_eq!(seeds, vec!["admin", "portal", "corporate", "intranet", "gateway"]);
    }

    #[test]
    fn test_character_references_decoded() {
        let html = "<p>Caf&eacute; r&eacute;sum&eacute; &copy; Acme&#8217;s &hellip; &#x4C;edger</p>";
        let seeds = extract_seeds(html, 300).unwrap();
        assert_eq!(seeds, vec!["café", "résumé", "acme", "ledger"]);
    }

    #[test]
    fn test_attribute_values_ignored() {
        let html = r#"<a title="x > portal" href="/login">Dashboard</a>"#;
        assert_eq!(extract_seeds(html, 300).unwrap(), vec!["dashboard"]);
    }

    #[test]
    fn test_common_words_are_not_seeds() {
        let text = "because although always another anything around across already";
        assert!(extract_seeds(text, 300).unwrap().is_empty());

        let seeds = extract_seeds("Because the firewall blocks another subnet", 300).unwrap();
        assert_eq!(seeds, vec!["firewall", "blocks", "subnet"]);
    }

    #[test]
    fn test_seed_limit() {
        let text = (0..500).map(|i| format!("word{i}x")).collect::<Vec<_>>().join(" ");
        let seeds = extract_seeds(&text, DEFAULT_SEED_LIMIT).unwrap();
        assert_eq!(seeds.len(), 300);
        assert_eq!(seeds[0], "word0x");
        assert_eq!(seeds[299], "word299x");
    }

    #[test]
    fn test_digits_and_short_tokens_dropped() {
        let seeds = extract_seeds("1234567 abc abcd 12ab", 10).unwrap();
        assert_eq!(seeds, vec!["abcd", "12ab"]);
    }

    #[test]
    fn test_file_seed_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<p>Firewall configuration</p>").unwrap();

        let source = FileSeedSource::new(file.path(), 1);
        assert_eq!(source.seeds().unwrap(), vec!["firewall"]);
        assert!(source.name().starts_with("file"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = FileSeedSource::new("/nonexistent/seed/file.html", 10);
        assert!(matches!(source.seeds(), Err(Error::Io(_))));
    }

    #[test]
    fn test_command_line_parsing() {
        let source = CommandSeedSource::from_command_line("cewl -d 1 https://target", 300).unwrap();
        assert_eq!(source.name(), "command 'cewl -d 1 https://target'");
        assert!(CommandSeedSource::from_command_line("   ", 300).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_seed_source() {
        let source = CommandSeedSource::new("echo", vec!["network".into(), "switch".into()], 300);
        assert_eq!(source.seeds().unwrap(), vec!["network", "switch"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command() {
        let source = CommandSeedSource::new("false", Vec::new(), 300);
        assert!(matches!(source.seeds(), Err(Error::ExtractorFailed { .. })));

        let source = CommandSeedSource::new("definitely-not-a-real-extractor", Vec::new(), 300);
        assert!(matches!(source.seeds(), Err(Error::ExtractorFailed { .. })));
    }
}
