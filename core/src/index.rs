//! Corpus storage: the forward index (documents by ordinal id) and the
//! inverted index (term → postings), with the build phase split off into
//! [`IndexBuilder`] so a finished [`Index`] cannot be mutated.

use crate::record::{RawRecord, RECORD_SEPARATOR};
use crate::tokenizer::{Tokenizer, UnicodeTokenizer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub type DocId = u32;

/// How much a term occurrence in a title counts relative to one in the
/// content.
pub const TITLE_WEIGHT: u32 = 10;

/// One corpus document, held in the forward index at position `doc_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub content: String,
}

/// One (document, term, weight) association in the inverted index. Postings
/// refer to documents by id, never by reference, so the forward index stays
/// freely resizable while the build runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term: String,
    pub weight: u32,
}

/// Accumulates documents and postings during the build phase. [`finish`]
/// freezes the result into an [`Index`], which exposes no mutation API.
///
/// [`finish`]: IndexBuilder::finish
pub struct IndexBuilder {
    forward: Vec<Document>,
    inverted: HashMap<String, Vec<Posting>>,
    tokenizer: Box<dyn Tokenizer + Send + Sync>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::with_tokenizer(Box::new(UnicodeTokenizer))
    }

    pub fn with_tokenizer(tokenizer: Box<dyn Tokenizer + Send + Sync>) -> Self {
        Self {
            forward: Vec::new(),
            inverted: HashMap::new(),
            tokenizer,
        }
    }

    /// Ingests one raw input line. Blank lines are ignored; a non-empty line
    /// without exactly three separator-delimited fields is logged and
    /// skipped, and consumes no document id. Returns the assigned id for a
    /// well-formed record.
    pub fn add_record(&mut self, line: &str) -> Option<DocId> {
        if line.trim().is_empty() {
            return None;
        }
        match RawRecord::parse(line) {
            Some(rec) => Some(self.add_document(rec.title, rec.url, rec.content)),
            None => {
                let fields = line.split(RECORD_SEPARATOR).count();
                tracing::warn!(fields, "skipping malformed record");
                None
            }
        }
    }

    /// Appends a document to the forward index and merges its postings into
    /// the inverted index. Ids are assigned sequentially from 0 and never
    /// reused.
    pub fn add_document(&mut self, title: &str, url: &str, content: &str) -> DocId {
        let doc_id = self.forward.len() as DocId;
        let doc = Document {
            doc_id,
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
        };
        self.index_terms(&doc);
        self.forward.push(doc);
        if doc_id % 100 == 0 {
            tracing::debug!(doc_id, "indexing");
        }
        doc_id
    }

    /// Tokenizes title and content separately, counts occurrences of each
    /// lowercased term per field, and emits one posting per distinct term
    /// with `weight = TITLE_WEIGHT * title_count + content_count`.
    fn index_terms(&mut self, doc: &Document) {
        #[derive(Default)]
        struct FieldCounts {
            title: u32,
            content: u32,
        }
        let mut counts: HashMap<String, FieldCounts> = HashMap::new();
        for token in self.tokenizer.tokenize(&doc.title) {
            counts.entry(token.to_lowercase()).or_default().title += 1;
        }
        for token in self.tokenizer.tokenize(&doc.content) {
            counts.entry(token.to_lowercase()).or_default().content += 1;
        }
        for (term, n) in counts {
            let posting = Posting {
                doc_id: doc.doc_id,
                weight: TITLE_WEIGHT * n.title + n.content,
                term: term.clone(),
            };
            self.inverted.entry(term).or_default().push(posting);
        }
    }

    /// Drains a line stream into the index. An I/O failure while reading is
    /// fatal; malformed records are skipped. Returns the number of documents
    /// added.
    pub fn read_records(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            let line = line.context("reading input record")?;
            if self.add_record(&line).is_some() {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Opens a record file and builds the whole index from it. Failure to
    /// open or read the file is the only fatal error; individual records
    /// never abort the build.
    pub fn build_from_path(mut self, path: impl AsRef<Path>) -> Result<Index> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "index build start");
        let file = File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?;
        self.read_records(BufReader::new(file))?;
        let index = self.finish();
        tracing::info!(
            docs = index.doc_count(),
            terms = index.term_count(),
            "index build complete"
        );
        Ok(index)
    }

    /// Freezes the builder into a read-only index.
    pub fn finish(self) -> Index {
        Index {
            forward: self.forward,
            inverted: self.inverted,
            tokenizer: self.tokenizer,
        }
    }
}

/// The built corpus. Immutable once constructed, so it can be shared across
/// concurrently running queries without locking.
pub struct Index {
    forward: Vec<Document>,
    inverted: HashMap<String, Vec<Posting>>,
    tokenizer: Box<dyn Tokenizer + Send + Sync>,
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("forward", &self.forward)
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

impl Index {
    /// Builds an index from a record file with the default tokenizer.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        IndexBuilder::new().build_from_path(path)
    }

    /// Bounds-checked forward lookup; `None` for any id at or past the
    /// document count.
    pub fn document(&self, doc_id: DocId) -> Option<&Document> {
        self.forward.get(doc_id as usize)
    }

    /// Exact-match postings lookup. Terms are stored lowercased, so callers
    /// pass the already-lowercased term. The returned list holds one entry
    /// per matching document, in document build order.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.inverted.get(term).map(Vec::as_slice)
    }

    /// Segments text with the tokenizer the index was built with, so the
    /// build and query paths share one segmentation capability.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn doc_count(&self) -> usize {
        self.forward.len()
    }

    pub fn term_count(&self) -> usize {
        self.inverted.len()
    }
}
