//! Flattens a tree of HTML files into the record file the index builder
//! consumes: one line per document, `title 0x03 url 0x03 content`.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use docsearch_core::RawRecord;
use scraper::{Html, Selector};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "parser")]
#[command(about = "Flatten an HTML tree into a raw_input record file", long_about = None)]
struct Cli {
    /// Root directory of the HTML corpus
    #[arg(long)]
    input: String,
    /// Output record file, one document per line
    #[arg(long, default_value = "./data/raw_input")]
    output: String,
    /// Prefix joined with each file's corpus-relative path to form its url
    #[arg(long)]
    url_prefix: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let root = Path::new(&cli.input);
    ensure!(
        root.is_dir(),
        "input directory {} does not exist",
        root.display()
    );

    if let Some(dir) = Path::new(&cli.output).parent() {
        fs::create_dir_all(dir).ok();
    }
    let out = File::create(&cli.output)
        .with_context(|| format!("creating output file {}", cli.output))?;
    let mut out = BufWriter::new(out);

    let extractor = Extractor::new();
    let mut written = 0usize;
    let mut skipped = 0usize;
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("html") {
            continue;
        }
        let html = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                skipped += 1;
                continue;
            }
        };
        match extractor.extract(&html) {
            Some((title, content)) => {
                let url = join_url(&cli.url_prefix, root, path);
                let rec = RawRecord {
                    title: &title,
                    url: &url,
                    content: &content,
                };
                writeln!(out, "{}", rec.to_line())
                    .with_context(|| format!("writing {}", cli.output))?;
                written += 1;
                if written % 100 == 0 {
                    tracing::debug!(written, "parsing");
                }
            }
            None => {
                tracing::warn!(path = %path.display(), "skipping file without a title");
                skipped += 1;
            }
        }
    }
    out.flush()
        .with_context(|| format!("writing {}", cli.output))?;
    tracing::info!(written, skipped, output = %cli.output, "parse complete");
    Ok(())
}

struct Extractor {
    title: Selector,
    body: Selector,
}

impl Extractor {
    fn new() -> Self {
        Self {
            title: Selector::parse("title").unwrap(),
            body: Selector::parse("body").unwrap(),
        }
    }

    /// Pulls the title text and the sanitized visible text out of one HTML
    /// document. `None` when there is no non-empty title.
    fn extract(&self, html: &str) -> Option<(String, String)> {
        let doc = Html::parse_document(html);
        let title = sanitize(&doc.select(&self.title).next()?.text().collect::<String>());
        if title.is_empty() {
            return None;
        }
        let content = match doc.select(&self.body).next() {
            Some(body) => body.text().collect::<Vec<_>>().join(" "),
            None => doc.root_element().text().collect::<Vec<_>>().join(" "),
        };
        Some((title, sanitize(&content)))
    }
}

/// Replaces control characters (newlines included, and any stray record
/// separator) with spaces and collapses whitespace runs, so every document
/// fits on one record line.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = true;
    for c in text.chars() {
        if c.is_whitespace() || c.is_control() {
            if !in_gap {
                out.push(' ');
                in_gap = true;
            }
        } else {
            out.push(c);
            in_gap = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Joins the url prefix with the file's path relative to the corpus root,
/// using forward slashes.
fn join_url(prefix: &str, root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{}", prefix, rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_whitespace_and_controls() {
        assert_eq!(sanitize("  a\n\nb\tc  "), "a b c");
        assert_eq!(sanitize("x\u{3}y"), "x y");
        assert_eq!(sanitize("already clean"), "already clean");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn url_joins_relative_path_with_forward_slashes() {
        let root = Path::new("/corpus");
        let path = Path::new("/corpus/guide/intro.html");
        assert_eq!(
            join_url("https://example.org/docs/", root, path),
            "https://example.org/docs/guide/intro.html"
        );
    }

    #[test]
    fn extracts_title_and_visible_text() {
        let ex = Extractor::new();
        let html = "<html><head><title> My Page </title></head>\
                    <body><p>First</p><p>Second &amp; third</p></body></html>";
        let (title, content) = ex.extract(html).unwrap();
        assert_eq!(title, "My Page");
        assert_eq!(content, "First Second & third");
    }

    #[test]
    fn documents_without_titles_are_skipped() {
        let ex = Extractor::new();
        assert!(ex.extract("<html><body>No title here</body></html>").is_none());
        assert!(ex
            .extract("<html><head><title>  </title></head><body>x</body></html>")
            .is_none());
    }

    #[test]
    fn extracted_records_survive_the_line_format() {
        let ex = Extractor::new();
        let html = "<title>T</title><body>line one\nline two</body>";
        let (title, content) = ex.extract(html).unwrap();
        let rec = RawRecord {
            title: &title,
            url: "http://x",
            content: &content,
        };
        let line = rec.to_line();
        assert!(!line.contains('\n'));
        let parsed = RawRecord::parse(&line).unwrap();
        assert_eq!(parsed.content, "line one line two");
    }
}
