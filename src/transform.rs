//! Word mutation rules
//!
//! Every word expands into the same fixed family of variants: case changes,
//! leet substitution, reversals, numeric padding and symbol padding. All
//! indexing is done on `char`s so multi-byte words are handled safely.

use crate::error::Result;
use crate::pool::{run_stage, Emitter};

use indicatif::ProgressBar;

/// Highest number appended or prepended to a word (inclusive)
pub const MAX_PADDING_NUMBER: u32 = 2050;

/// Symbols used for padding, applied as growing prefixes of this sequence
pub const PADDING_SYMBOLS: [&str; 4] = ["!", "@", "#", "$"];

/// Number of case, leet and reversal variants
pub const STYLE_VARIANTS: usize = 10;

/// Number of variants produced for any non-empty word
pub const VARIANTS_PER_WORD: usize =
    STYLE_VARIANTS + 2 * (MAX_PADDING_NUMBER as usize + 1) + 2 * PADDING_SYMBOLS.len();

/// Map a single character to its leet replacement
#[inline]
fn leet_char(c: char) -> char {
    match c {
        'a' => '4',
        'e' => '3',
        'l' => '1',
        't' => '7',
        'o' => '0',
        other => other,
    }
}

/// Apply leet substitution to every character of the word
pub fn leet(word: &str) -> String {
    word.chars().map(leet_char).collect()
}

fn upper(chars: &[char]) -> String {
    chars.iter().flat_map(|c| c.to_uppercase()).collect()
}

fn plain(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Produce every variant of `word` in order, passing each one to `emit`
///
/// Stops early and returns `false` if `emit` returns `false`, which lets a
/// worker give up once nobody is listening any more.
pub fn for_each_variant<F>(word: &str, mut emit: F) -> bool
where
    F: FnMut(String) -> bool,
{
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n == 0 {
        return true;
    }

    let mut reversed = chars.clone();
    reversed.reverse();

    let reversed_tail = if n == 1 {
        upper(&chars)
    } else {
        let mut s = plain(&reversed[..1]);
        s.push_str(&upper(&reversed[1..n - 1]));
        s
    };

    let styles: [String; STYLE_VARIANTS] = [
        word.to_lowercase(),
        word.to_uppercase(),
        upper(&chars[..1]) + &plain(&chars[1..]),
        plain(&chars[..n - 1]) + &upper(&chars[n - 1..]),
        plain(&chars[..1]) + &upper(&chars[1..]),
        leet(word),
        plain(&reversed).to_lowercase(),
        upper(&reversed),
        upper(&reversed[..1]) + &plain(&reversed[1..]),
        reversed_tail,
    ];

    for variant in styles {
        if !emit(variant) {
            return false;
        }
    }

    for i in 0..=MAX_PADDING_NUMBER {
        if !emit(format!("{word}{i}")) || !emit(format!("{i}{word}")) {
            return false;
        }
    }

    for k in 1..=PADDING_SYMBOLS.len() {
        let symbols = PADDING_SYMBOLS[..k].concat();
        if !emit(format!("{word}{symbols}")) || !emit(format!("{symbols}{word}")) {
            return false;
        }
    }

    true
}

/// Collect the full variant family of a word
pub fn transform_family(word: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(VARIANTS_PER_WORD);
    for_each_variant(word, |v| {
        variants.push(v);
        true
    });
    variants
}

/// Worker pool expanding words into their variant families
pub struct WordTransformer {
    workers: usize,
}

impl WordTransformer {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Expected output size for `words` non-empty inputs
    pub fn expected_variants(words: usize) -> usize {
        words * VARIANTS_PER_WORD
    }

    /// Transform every word; variants of different words interleave freely
    pub fn transform(&self, words: Vec<String>, progress: &ProgressBar) -> Result<Vec<String>> {
        run_stage(
            "transform",
            words,
            self.workers,
            progress,
            |word: String, out: &Emitter<'_, String>| {
                for_each_variant(&word, |variant| out.emit(variant));
            },
            |_| {},
        )
    }
}
