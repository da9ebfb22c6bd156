//! Word segmentation. The index and engine only depend on the [`Tokenizer`]
//! contract; which segmentation algorithm sits behind it is opaque to them.

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = include_str!("../data/stopwords.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect();
}

/// Turns a string into an ordered sequence of token strings.
///
/// Called over titles and contents at build time and over the raw query
/// string at query time. Case folding of the produced tokens is the
/// caller's job, so implementations are free to preserve or fold case.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default segmentation: NFKC-normalize, then extract Unicode word tokens.
/// Keeps the original case and does no filtering, so every indexed term
/// occurs verbatim somewhere in the document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect();
        WORD.find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Heavier analyzer: lowercases, drops stop words, and Snowball-stems each
/// token. Produces smaller indexes and matches inflected forms at the cost
/// of indexed terms no longer matching document text literally.
pub struct StemmingTokenizer {
    stemmer: Stemmer,
}

impl StemmingTokenizer {
    pub fn english() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Tokenizer for StemmingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect::<String>().to_lowercase();
        WORD.find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|token| !STOPWORDS.contains(token))
            .map(|token| self.stemmer.stem(token).to_string())
            .collect()
    }
}
