use docsearch_core::{IndexBuilder, SearchEngine, StemmingTokenizer};
use std::io::Cursor;

#[test]
fn two_document_corpus_answers_per_document_hits() {
    let input = "Title A\u{3}http://a\u{3}hello world\nTitle B\u{3}http://b\u{3}world peace\n";
    let mut b = IndexBuilder::new();
    b.read_records(Cursor::new(input)).unwrap();
    let engine = SearchEngine::new(b.finish());

    let hits = engine.search("world");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Title A");
    assert_eq!(hits[0].url, "http://a");
    assert_eq!(hits[0].desc, "hello world");
    assert_eq!(hits[1].title, "Title B");
    assert_eq!(hits[1].desc, "world peace");

    assert!(engine.search("zzz").is_empty());
}

#[test]
fn hits_are_ordered_by_descending_weight() {
    let mut b = IndexBuilder::new();
    b.add_document("other", "u0", "search search search");
    b.add_document("search", "u1", "nothing relevant");
    b.add_document("plain", "u2", "search once");
    let engine = SearchEngine::new(b.finish());

    let hits = engine.search("search");
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].url, "u1");
    assert_eq!(hits[1].url, "u0");
    assert_eq!(hits[2].url, "u2");
}

#[test]
fn equal_weights_order_by_document_id() {
    let mut b = IndexBuilder::new();
    b.add_document("t", "u0", "even tie");
    b.add_document("t", "u1", "tie also");
    let engine = SearchEngine::new(b.finish());

    let hits = engine.search("tie");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].url, "u0");
    assert_eq!(hits[1].url, "u1");
}

#[test]
fn documents_matching_several_terms_appear_once_per_term() {
    let mut b = IndexBuilder::new();
    b.add_document("alpha beta", "u0", "alpha beta");
    let engine = SearchEngine::new(b.finish());

    let hits = engine.search("alpha beta");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, hits[1].title);
    assert_eq!(hits[0].url, hits[1].url);
}

#[test]
fn repeated_query_tokens_repeat_their_entries() {
    let mut b = IndexBuilder::new();
    b.add_document("alpha", "u0", "alpha text");
    let engine = SearchEngine::new(b.finish());

    assert_eq!(engine.search("alpha").len(), 1);
    assert_eq!(engine.search("alpha alpha").len(), 2);
}

#[test]
fn search_is_idempotent() {
    let mut b = IndexBuilder::new();
    b.add_document("alpha beta", "u0", "alpha beta gamma");
    b.add_document("gamma", "u1", "beta beta");
    let engine = SearchEngine::new(b.finish());

    let first = engine.search("alpha beta gamma");
    let second = engine.search("alpha beta gamma");
    assert_eq!(first, second);
}

#[test]
fn empty_query_yields_no_hits() {
    let mut b = IndexBuilder::new();
    b.add_document("doc", "u0", "some text");
    let engine = SearchEngine::new(b.finish());

    assert!(engine.search("").is_empty());
    assert!(engine.search("   \t").is_empty());
}

#[test]
fn hits_serialize_with_title_url_desc_keys() {
    let mut b = IndexBuilder::new();
    b.add_document("doc", "u0", "alpha text");
    let engine = SearchEngine::new(b.finish());

    let value = serde_json::to_value(engine.search("alpha")).unwrap();
    let obj = value.as_array().unwrap()[0].as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["desc", "title", "url"]);
}

#[test]
fn stemming_tokenizer_folds_query_inflections() {
    let mut b = IndexBuilder::with_tokenizer(Box::new(StemmingTokenizer::english()));
    b.add_document("Running guide", "u0", "All about running shoes");
    let engine = SearchEngine::new(b.finish());

    // "runs" and "running" share a stem, so the inflected query still hits.
    let hits = engine.search("runs");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Running guide");
}
