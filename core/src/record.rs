//! The flat record format produced by the parser and consumed by the index
//! builder: one document per line, fields separated by a 0x03 byte.

/// Field separator in the raw input file, chosen because it cannot appear in
/// text extracted from HTML.
pub const RECORD_SEPARATOR: char = '\u{3}';

/// A borrowed view of one well-formed input line, in field order
/// `title, url, content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub content: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Splits a line into its three fields. Returns `None` when the line
    /// does not contain exactly three separator-delimited fields.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split(RECORD_SEPARATOR);
        let title = fields.next()?;
        let url = fields.next()?;
        let content = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self { title, url, content })
    }

    /// Renders the record as a single line, without a trailing newline.
    /// Fields must already be free of newlines and separator bytes.
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.title,
            self.url,
            self.content,
            sep = RECORD_SEPARATOR
        )
    }
}
