//! In-memory full-text search over a corpus of preprocessed documents.
//!
//! The input is a flat record file produced by the parser binary: one
//! document per line, `title`/`url`/`content` fields separated by a 0x03
//! byte. [`IndexBuilder`] turns the records into a forward index and a
//! term-frequency-weighted inverted index; [`SearchEngine`] answers
//! free-text queries over the frozen [`Index`] with ranked
//! title/url/snippet hits. Word segmentation sits behind the [`Tokenizer`]
//! trait and is shared by the build and query paths.

pub mod engine;
pub mod index;
pub mod record;
pub mod tokenizer;

pub use engine::{snippet, SearchEngine, SearchHit};
pub use index::{DocId, Document, Index, IndexBuilder, Posting, TITLE_WEIGHT};
pub use record::{RawRecord, RECORD_SEPARATOR};
pub use tokenizer::{StemmingTokenizer, Tokenizer, UnicodeTokenizer};
