//! Error types for wordlist generation
//!
//! Fatal startup conditions (dictionary, configuration) are kept apart from
//! acquisition and output failures so callers can report them precisely.
//! Per-word conditions such as "no synonyms" are not errors at all.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The synonym dictionary could not be opened or read
    #[error("failed to load dictionary file {path:?}")]
    DictionaryLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line did not follow the expected layout
    #[error("malformed dictionary entry in {path:?} at line {line}: {reason}")]
    MalformedDictionary {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// External word-extraction command exited unsuccessfully
    #[error("extractor command '{command}' failed: {reason}")]
    ExtractorFailed { command: String, reason: String },

    /// Page markup could not be rendered to text
    #[error("failed to render page markup: {0}")]
    Markup(String),

    #[error("failed to spawn {stage} worker thread")]
    WorkerSpawn {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error happened before any work was scheduled
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::DictionaryLoad { .. } | Self::MalformedDictionary { .. } | Self::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_classification() {
        let err = Error::DictionaryLoad {
            path: PathBuf::from("dict/index.noun"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_startup());
        assert!(Error::InvalidConfig("workers".into()).is_startup());

        let err = Error::ExtractorFailed {
            command: "cewl".into(),
            reason: "exit status 1".into(),
        };
        assert!(!err.is_startup());
        assert!(!Error::Markup("unexpected end of input".into()).is_startup());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::MalformedDictionary {
            path: PathBuf::from("data.noun"),
            line: 12,
            reason: "missing word count".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 12"));
        assert!(msg.contains("missing word count"));
    }
}
