//! TradeRecord — one normalized row of the uploaded trade log.

use serde::{Deserialize, Serialize};

/// A canonical trade record produced by the normalizer.
///
/// Every field is always populated: missing text columns become empty strings
/// and missing or unparsable numeric columns become `0.0`. Numeric fields are
/// always finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeRecord {
    /// Raw time label, e.g. `2025-01-10 09:15`. Falls back to the `date` column.
    pub time: String,
    /// Instrument symbol. Falls back to the `instrument` column.
    pub symbol: String,
    /// Upper-cased side (`BUY`, `SELL`, ...), empty when absent.
    pub side: String,
    pub qty: f64,
    pub price: f64,
    /// Realized profit/loss of the trade.
    pub pl: f64,
    /// Portion of `time` before the first space; the daily grouping key.
    #[serde(rename = "dateOnly")]
    pub date_only: String,
}

impl TradeRecord {
    /// A trade is a winner only when it made money. Flat trades count as losses.
    pub fn is_winner(&self) -> bool {
        self.pl > 0.0
    }
}
