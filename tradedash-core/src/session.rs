//! Dashboard session — the single owner of loaded state.
//!
//! Each load (file text, built-in example or cache restore) replaces the
//! trade list and snapshot wholesale. Loads are synchronous, so the last one
//! to complete wins.

use tracing::debug;

use crate::aggregate::{filter_by_symbol, summarize, DashboardSnapshot, Statistics};
use crate::cache::TradeCache;
use crate::domain::TradeRecord;
use crate::normalize::{normalize_rows, NormalizeError, ParseMode};
use crate::parser::parse_csv;
use crate::sample::EXAMPLE_CSV;

/// Where the current trade list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Text,
    Example,
    Cache,
}

#[derive(Debug, Default)]
pub struct DashboardSession {
    trades: Vec<TradeRecord>,
    snapshot: Option<DashboardSnapshot>,
    filter: String,
    mode: ParseMode,
    source: Option<LoadSource>,
    cache: Option<TradeCache>,
}

impl DashboardSession {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Attach a cache: successful loads are saved to it and
    /// [`restore_from_cache`](Self::restore_from_cache) reads from it.
    pub fn with_cache(mut self, cache: TradeCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Parse, normalize and aggregate `text`, replacing the current state.
    ///
    /// Returns the number of trades loaded. Only strict mode can fail, and a
    /// failed load leaves the previous state untouched.
    pub fn load_csv(&mut self, text: &str) -> Result<usize, NormalizeError> {
        let trades = normalize_rows(&parse_csv(text), self.mode)?;
        Ok(self.replace(trades, LoadSource::Text))
    }

    /// Load the built-in example dataset.
    pub fn load_example(&mut self) -> usize {
        let trades = normalize_rows(&parse_csv(EXAMPLE_CSV), ParseMode::Lenient)
            .unwrap_or_default();
        self.replace(trades, LoadSource::Example)
    }

    /// Replace state with the cached trade list, if there is one.
    ///
    /// Returns `false` (state untouched) when no cache is attached or nothing
    /// usable is stored.
    pub fn restore_from_cache(&mut self) -> bool {
        let Some(trades) = self.cache.as_ref().and_then(TradeCache::restore) else {
            return false;
        };
        self.replace(trades, LoadSource::Cache);
        true
    }

    fn replace(&mut self, mut trades: Vec<TradeRecord>, source: LoadSource) -> usize {
        self.snapshot = summarize(&mut trades);
        self.trades = trades;
        self.source = Some(source);
        debug!(trades = self.trades.len(), ?source, "session replaced");

        if source != LoadSource::Cache && !self.trades.is_empty() {
            if let Some(cache) = &self.cache {
                cache.save(&self.trades);
            }
        }
        self.trades.len()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Loaded trades matching the current symbol filter, in sorted order.
    pub fn visible_trades(&self) -> Vec<&TradeRecord> {
        filter_by_symbol(&self.trades, &self.filter)
    }

    /// All loaded trades, sorted by time.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// `None` while no trades are loaded.
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn stats(&self) -> Option<&Statistics> {
        self.snapshot.as_ref().map(|s| &s.stats)
    }

    pub fn is_idle(&self) -> bool {
        self.snapshot.is_none()
    }

    pub fn source(&self) -> Option<LoadSource> {
        self.source
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn cache(&self) -> Option<&TradeCache> {
        self.cache.as_ref()
    }
}
