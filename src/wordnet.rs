//! WordNet database loader
//!
//! Reads the `index.*` and `data.*` files of a WordNet 3.x `dict/` directory
//! into memory. Loading happens once before any worker starts; afterwards the
//! database is only read.

use crate::encoding::MmapLineIterator;
use crate::error::{Error, Result};
use crate::lookup::{LexicalLookup, SynonymGroup};

use ahash::RandomState;
use hashbrown::HashMap;
use std::path::{Path, PathBuf};

/// Parts of speech in search order, with their file suffix
const PARTS_OF_SPEECH: [(PartOfSpeech, &str); 4] = [
    (PartOfSpeech::Noun, "noun"),
    (PartOfSpeech::Verb, "verb"),
    (PartOfSpeech::Adjective, "adj"),
    (PartOfSpeech::Adverb, "adv"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

/// Words of every synset of one part of speech, keyed by synset offset
type SynsetTable = HashMap<u64, Vec<String>, RandomState>;

/// Lemma to ranked synset offsets
type LemmaIndex = HashMap<String, Vec<u64>, RandomState>;

/// In-memory WordNet database
pub struct WordNet {
    indexes: Vec<(PartOfSpeech, LemmaIndex)>,
    synsets: HashMap<PartOfSpeech, SynsetTable, RandomState>,
}

impl WordNet {
    /// Load the database from a WordNet `dict/` directory
    pub fn load(dir: &Path) -> Result<Self> {
        let mut indexes = Vec::with_capacity(PARTS_OF_SPEECH.len());
        let mut synsets = HashMap::with_hasher(RandomState::new());

        for (pos, suffix) in PARTS_OF_SPEECH {
            let index_path = dir.join(format!("index.{suffix}"));
            let data_path = dir.join(format!("data.{suffix}"));

            let index = load_index(&index_path)?;
            let data = load_data(&data_path)?;
            log::debug!(
                "Loaded {} lemmas and {} synsets for {:?}",
                index.len(),
                data.len(),
                pos
            );

            indexes.push((pos, index));
            synsets.insert(pos, data);
        }

        Ok(Self { indexes, synsets })
    }

    /// Number of distinct lemmas across all parts of speech
    pub fn lemma_count(&self) -> usize {
        self.indexes.iter().map(|(_, idx)| idx.len()).sum()
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.values().map(|t| t.len()).sum()
    }
}

impl LexicalLookup for WordNet {
    fn search(&self, word: &str) -> Vec<SynonymGroup> {
        let key = normalize_lemma(word);
        let mut groups = Vec::new();

        for (pos, index) in &self.indexes {
            let Some(offsets) = index.get(&key) else {
                continue;
            };
            let Some(table) = self.synsets.get(pos) else {
                continue;
            };
            groups.extend(offsets.iter().filter_map(|offset| table.get(offset).cloned()));
        }

        groups
    }
}

/// Lemmas are stored lowercase with underscores for spaces
fn normalize_lemma(word: &str) -> String {
    word.trim().to_lowercase().replace(' ', "_")
}

/// Drop the adjective syntactic marker, e.g. `galore(ip)`
fn strip_marker(word: &str) -> &str {
    for marker in ["(a)", "(p)", "(ip)"] {
        if let Some(stripped) = word.strip_suffix(marker) {
            return stripped;
        }
    }
    word
}

fn open_lines(path: &Path) -> Result<MmapLineIterator> {
    let lines = MmapLineIterator::new(path).map_err(|source| Error::DictionaryLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Reading {:?} as {}", path, lines.encoding().name());
    Ok(lines)
}

fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedDictionary {
        path: PathBuf::from(path),
        line,
        reason: reason.into(),
    }
}

/// Parse an index file
///
/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt [synset_offset...]`
fn load_index(path: &Path) -> Result<LemmaIndex> {
    let mut lines = open_lines(path)?;
    let mut index = LemmaIndex::with_hasher(RandomState::new());

    while let Some(line) = lines.next() {
        // License header lines start with a space
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }
        let line_no = lines.line_number();
        let fields: Vec<&str> = line.split_whitespace().collect();

        let number = |i: usize, what: &str| -> Result<usize> {
            fields
                .get(i)
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| malformed(path, line_no, format!("invalid {what}")))
        };

        let synset_cnt = number(2, "synset count")?;
        let p_cnt = number(3, "pointer count")?;
        let offsets_start = 4 + p_cnt + 2;
        let offsets = fields
            .get(offsets_start..offsets_start + synset_cnt)
            .ok_or_else(|| malformed(path, line_no, "truncated synset offsets"))?
            .iter()
            .map(|f| f.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| malformed(path, line_no, "invalid synset offset"))?;

        index.insert(fields[0].to_string(), offsets);
    }

    Ok(index)
}

/// Parse a data file
///
/// `offset lex_filenum ss_type w_cnt [word lex_id...] p_cnt ... | gloss`
fn load_data(path: &Path) -> Result<SynsetTable> {
    let mut lines = open_lines(path)?;
    let mut table = SynsetTable::with_hasher(RandomState::new());

    while let Some(line) = lines.next() {
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }
        let line_no = lines.line_number();
        let fields: Vec<&str> = line.split_whitespace().collect();

        let offset: u64 = fields
            .first()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| malformed(path, line_no, "invalid synset offset"))?;
        let w_cnt = fields
            .get(3)
            .and_then(|f| usize::from_str_radix(f, 16).ok())
            .ok_or_else(|| malformed(path, line_no, "invalid word count"))?;

        let words = (0..w_cnt)
            .map(|i| {
                fields
                    .get(4 + 2 * i)
                    .map(|w| strip_marker(w).to_string())
                    .ok_or_else(|| malformed(path, line_no, "truncated word list"))
            })
            .collect::<Result<Vec<_>>>()?;

        table.insert(offset, words);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "  1 This software and database is being provided to you\n";

    fn write_dict(dir: &Path) {
        for suffix in ["noun", "verb", "adj", "adv"] {
            fs::write(dir.join(format!("index.{suffix}")), HEADER).unwrap();
            fs::write(dir.join(format!("data.{suffix}")), HEADER).unwrap();
        }

        fs::write(
            dir.join("index.noun"),
            format!(
                "{HEADER}key n 2 1 @ 2 1 00000100 00000200\nsecurity n 1 0 1 0 00000300\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.join("data.noun"),
            format!(
                "{HEADER}00000100 06 n 02 key 0 cay 0 000 | a metal device\n\
                 00000200 09 n 01 key 1 000 | something crucial\n\
                 00000300 04 n 03 security 0 protection 0 safety 0 000 | freedom from danger\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.join("index.adj"),
            format!("{HEADER}secure a 1 0 1 0 00000400\n"),
        )
        .unwrap();
        fs::write(
            dir.join("data.adj"),
            format!("{HEADER}00000400 00 a 02 secure(p) 0 safe 0 000 | free from danger\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_load_and_search() {
        let dir = TempDir::new().unwrap();
        write_dict(dir.path());

        let wn = WordNet::load(dir.path()).unwrap();
        assert_eq!(wn.lemma_count(), 3);
        assert_eq!(wn.synset_count(), 4);

        let groups = wn.search("key");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec!["key".to_string(), "cay".to_string()]);
        assert_eq!(groups[1], vec!["key".to_string()]);
    }

    #[test]
    fn test_search_normalizes_and_strips_markers() {
        let dir = TempDir::new().unwrap();
        write_dict(dir.path());
        let wn = WordNet::load(dir.path()).unwrap();

        let groups = wn.search("  SECURE ");
        assert_eq!(groups, vec![vec!["secure".to_string(), "safe".to_string()]]);
        assert!(wn.search("nothing").is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = WordNet::load(&dir.path().join("missing")).err().unwrap();
        assert!(matches!(err, Error::DictionaryLoad { .. }));
        assert!(err.is_startup());
    }

    #[test]
    fn test_malformed_data_line() {
        let dir = TempDir::new().unwrap();
        write_dict(dir.path());
        fs::write(dir.path().join("data.verb"), "00000500 30 v zz run\n").unwrap();

        match WordNet::load(dir.path()) {
            Err(Error::MalformedDictionary { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed dictionary, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_truncated_index_line() {
        let dir = TempDir::new().unwrap();
        write_dict(dir.path());
        fs::write(dir.path().join("index.adv"), format!("{HEADER}fast r 2 0 2 0 00000600\n")).unwrap();

        let err = WordNet::load(dir.path()).err().unwrap();
        assert!(matches!(err, Error::MalformedDictionary { line: 2, .. }));
    }
}
