//! CSV text → raw rows.
//!
//! Deliberately minimal: literal comma splitting with no quoting or escaping,
//! and no error path. Malformed input degrades to empty cells.

use tracing::debug;

use crate::domain::RawRow;

/// Parse raw CSV text into header-keyed rows.
///
/// - Leading/trailing whitespace of the whole text is removed first, so
///   trailing blank lines never become rows.
/// - Lines end at `\n`; a preceding `\r` is dropped.
/// - Header cells are trimmed and lower-cased. Duplicate headers overwrite
///   each other, last occurrence wins.
/// - Data cells are trimmed and zipped positionally with the headers. Short
///   rows are padded with empty strings, extra cells are dropped.
///
/// Blank lines inside the text are kept and yield rows whose cells are all
/// empty.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let text = trim_text(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let headers: Vec<String> = match lines.next() {
        Some(header) => header
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect(),
        None => return Vec::new(),
    };

    let rows: Vec<RawRow> = lines.map(|line| zip_row(&headers, line)).collect();
    debug!(headers = headers.len(), rows = rows.len(), "parsed csv");
    rows
}

fn zip_row(headers: &[String], line: &str) -> RawRow {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), cells.get(i).copied().unwrap_or("").to_string()))
        .collect()
}

/// Whitespace trim that also strips a byte-order mark, which spreadsheet
/// exports commonly prepend.
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
