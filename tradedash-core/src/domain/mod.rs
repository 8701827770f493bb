//! Domain types for tradedash

pub mod trade;

pub use trade::TradeRecord;

/// One parsed CSV data line: lower-cased header name to trimmed cell value.
pub type RawRow = std::collections::HashMap<String, String>;
