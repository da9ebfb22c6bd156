//! Query execution: tokenize the query, gather postings, rank, and render
//! title/url/snippet hits.

use crate::index::{Index, Posting};
use serde::{Deserialize, Serialize};

/// Snippet window length, in bytes of content.
pub const SNIPPET_WINDOW: usize = 160;
/// Bytes of context kept ahead of the first match inside the window.
const SNIPPET_LEAD: usize = 60;
const ELLIPSIS: &str = "...";

/// One rendered search result, serialized with exactly the JSON keys
/// `title`, `url`, `desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub desc: String,
}

/// Wraps a built [`Index`] and answers free-text queries with ranked hits.
/// Holds no mutable state, so one engine serves any number of concurrent
/// callers.
pub struct SearchEngine {
    index: Index,
}

impl SearchEngine {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Runs one query and returns hits ordered by descending per-term
    /// weight; ties order by ascending document id, then by term.
    ///
    /// Postings from different query terms are concatenated, not merged: a
    /// document matching several query terms appears once per matched term,
    /// each entry ranked and rendered with its own weight and snippet. An
    /// empty or unmatched query returns an empty vec, never an error.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let mut matched: Vec<&Posting> = Vec::new();
        for token in self.index.tokenize(query) {
            let term = token.to_lowercase();
            if let Some(postings) = self.index.postings(&term) {
                matched.extend(postings);
            }
        }
        matched.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then(a.doc_id.cmp(&b.doc_id))
                .then(a.term.cmp(&b.term))
        });

        let mut hits = Vec::with_capacity(matched.len());
        for posting in matched {
            let Some(doc) = self.index.document(posting.doc_id) else {
                continue;
            };
            hits.push(SearchHit {
                title: doc.title.clone(),
                url: doc.url.clone(),
                desc: snippet(&doc.content, &posting.term),
            });
        }
        hits
    }
}

/// Extracts the result preview: a [`SNIPPET_WINDOW`]-byte window starting
/// [`SNIPPET_LEAD`] bytes before the first occurrence of `term` in
/// `content`, or the content prefix when the term does not occur. A window
/// that does not reach the end of the content gets an ellipsis marker.
///
/// The lookup is case-sensitive: the term arrives lowercased while content
/// keeps its original case, so a differently-cased occurrence falls back to
/// the prefix window. Window edges are snapped down to char boundaries.
pub fn snippet(content: &str, term: &str) -> String {
    let Some(pos) = content.find(term) else {
        if content.len() < SNIPPET_WINDOW {
            return content.to_string();
        }
        let end = floor_char_boundary(content, SNIPPET_WINDOW);
        return format!("{}{}", &content[..end], ELLIPSIS);
    };
    let beg = floor_char_boundary(content, pos.saturating_sub(SNIPPET_LEAD));
    if beg + SNIPPET_WINDOW >= content.len() {
        content[beg..].to_string()
    } else {
        let end = floor_char_boundary(content, beg + SNIPPET_WINDOW);
        format!("{}{}", &content[beg..end], ELLIPSIS)
    }
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
