//! Raw rows → canonical trade records.
//!
//! Lenient mode never fails: missing or malformed fields fall back to empty
//! strings and zeros. Strict mode is an opt-in layer on top that rejects
//! numeric cells which are present but not entirely numeric.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{RawRow, TradeRecord};

/// How defective numeric cells are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Default: anything unparsable becomes `0`.
    #[default]
    Lenient,
    /// Non-empty numeric cells must be a complete number.
    Strict,
}

/// Errors from strict normalization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("line {line}: column '{field}' has non-numeric value '{value}'")]
    InvalidNumber {
        /// 1-based data line (the header is line 0).
        line: usize,
        field: &'static str,
        value: String,
    },
}

const NUMERIC_FIELDS: [&str; 3] = ["qty", "price", "pl"];

/// Normalize a single row. Never fails, never skips.
pub fn normalize_row(row: &RawRow) -> TradeRecord {
    let time = aliased(row, "time", "date").to_string();
    let date_only = date_only(&time).to_string();
    TradeRecord {
        symbol: aliased(row, "symbol", "instrument").to_string(),
        side: field(row, "side").to_uppercase(),
        qty: parse_number(field(row, "qty")),
        price: parse_number(field(row, "price")),
        pl: parse_number(field(row, "pl")),
        date_only,
        time,
    }
}

/// Normalize all rows under the given mode.
///
/// In lenient mode this always returns `Ok` with exactly one record per row.
pub fn normalize_rows(rows: &[RawRow], mode: ParseMode) -> Result<Vec<TradeRecord>, NormalizeError> {
    if mode == ParseMode::Strict {
        for (i, row) in rows.iter().enumerate() {
            check_numeric_fields(row, i + 1)?;
        }
    }
    let trades: Vec<TradeRecord> = rows.iter().map(normalize_row).collect();
    debug!(trades = trades.len(), ?mode, "normalized rows");
    Ok(trades)
}

fn check_numeric_fields(row: &RawRow, line: usize) -> Result<(), NormalizeError> {
    for name in NUMERIC_FIELDS {
        let value = field(row, name);
        if !value.is_empty() && scan_number(value) != Some(value) {
            return Err(NormalizeError::InvalidNumber {
                line,
                field: name,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// Primary column unless it is absent or empty, then the alias column.
fn aliased<'a>(row: &'a RawRow, primary: &str, alias: &str) -> &'a str {
    match field(row, primary) {
        "" => field(row, alias),
        value => value,
    }
}

/// Everything before the first space, or the whole string.
pub fn date_only(time: &str) -> &str {
    time.split(' ').next().unwrap_or("")
}

/// Parse the longest leading decimal number of `s`.
///
/// Returns `0.0` when there is no numeric prefix, when the value is not
/// finite, and for negative zero.
pub fn parse_number(s: &str) -> f64 {
    scan_number(s)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(0.0)
}

/// Longest prefix of `s` (after leading whitespace) matching
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn scan_number(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_count = frac_end - (end + 1);
        if digit_count + frac_count > 0 {
            digit_count += frac_count;
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    Some(&s[..end])
}
