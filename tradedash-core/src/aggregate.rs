//! Portfolio statistics and chart series — pure functions over a trade list.
//!
//! One load produces one [`DashboardSnapshot`]:
//! - **Statistics**: total P/L, win/loss counts, win rate and the mean P/L
//!   of each side
//! - **Equity curve**: running P/L, one point per trade in time order
//! - **Daily P/L**: sums per `date_only` key, keys ascending
//! - **Win/loss**: the two counts behind the distribution chart
//!
//! Everything here is recomputed from scratch on every load. The only
//! mutation is the in-place sort performed by [`summarize`]. Averages are
//! kept at full precision; rounding to cents happens only when formatting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::TradeRecord;

// ─── Snapshot types ────────────────────────────────────────────────

/// Summary statistics for a loaded trade list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_pl: f64,
    pub trade_count: usize,
    pub win_count: usize,
    /// Includes flat (`pl == 0`) trades.
    pub loss_count: usize,
    /// Percentage, rounded to two decimals.
    pub win_rate: f64,
    /// Mean P/L of winners, `None` without winners.
    pub avg_win: Option<f64>,
    /// Mean P/L of losers, `None` without losers.
    pub avg_loss: Option<f64>,
}

/// One equity-curve point: the trade's raw time label and the running P/L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub label: String,
    pub cumulative: f64,
}

/// Summed P/L for one `date_only` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub sum: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: usize,
    pub losses: usize,
}

/// The three chart-ready series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub equity: Vec<EquityPoint>,
    pub daily: Vec<DailyPoint>,
    pub win_loss: WinLoss,
}

/// Statistics and series derived from one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: Statistics,
    pub series: ChartSeries,
}

// ─── Ordering and snapshot ─────────────────────────────────────────

/// Sort trades by their raw `time` string.
///
/// Plain lexicographic order: correct only when every label shares one
/// zero-padded format such as `YYYY-MM-DD HH:MM`. The sort is stable, so
/// identical labels keep their input order.
pub fn sort_by_time(trades: &mut [TradeRecord]) {
    trades.sort_by(|a, b| a.time.cmp(&b.time));
}

/// Sort `trades` and derive the full snapshot.
///
/// Returns `None` for an empty list; "no trades" is an idle state, not a
/// zeroed snapshot.
pub fn summarize(trades: &mut [TradeRecord]) -> Option<DashboardSnapshot> {
    if trades.is_empty() {
        return None;
    }
    sort_by_time(trades);
    let snapshot = DashboardSnapshot {
        stats: statistics(trades),
        series: ChartSeries {
            equity: equity_curve(trades),
            daily: daily_pl(trades),
            win_loss: win_loss(trades),
        },
    };
    debug!(
        trades = snapshot.stats.trade_count,
        days = snapshot.series.daily.len(),
        "built dashboard snapshot"
    );
    Some(snapshot)
}

// ─── Statistics ────────────────────────────────────────────────────

/// Statistics over `trades` in their current order.
pub fn statistics(trades: &[TradeRecord]) -> Statistics {
    let (wins, losses): (Vec<&TradeRecord>, Vec<&TradeRecord>) =
        trades.iter().partition(|t| t.is_winner());

    Statistics {
        total_pl: total_pl(trades),
        trade_count: trades.len(),
        win_count: wins.len(),
        loss_count: losses.len(),
        win_rate: win_rate(wins.len(), trades.len()),
        avg_win: mean_pl(&wins),
        avg_loss: mean_pl(&losses),
    }
}

pub fn total_pl(trades: &[TradeRecord]) -> f64 {
    trades.iter().map(|t| t.pl).sum()
}

/// Winners as a percentage of all trades, two decimals; `0` for no trades.
pub fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (wins as f64 / total as f64 * 10_000.0).round() / 100.0
}

fn mean_pl(trades: &[&TradeRecord]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    Some(trades.iter().map(|t| t.pl).sum::<f64>() / trades.len() as f64)
}

// ─── Chart series ──────────────────────────────────────────────────

/// Running P/L, one point per trade. Duplicate labels are not merged.
pub fn equity_curve(trades: &[TradeRecord]) -> Vec<EquityPoint> {
    trades
        .iter()
        .scan(0.0_f64, |cum, t| {
            *cum += t.pl;
            Some(EquityPoint {
                label: t.time.clone(),
                cumulative: *cum,
            })
        })
        .collect()
}

/// P/L summed per exact `date_only` key, keys ascending.
pub fn daily_pl(trades: &[TradeRecord]) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<&str, f64> = BTreeMap::new();
    for t in trades {
        *by_day.entry(t.date_only.as_str()).or_insert(0.0) += t.pl;
    }
    by_day
        .into_iter()
        .map(|(date, sum)| DailyPoint {
            date: date.to_string(),
            sum,
        })
        .collect()
}

pub fn win_loss(trades: &[TradeRecord]) -> WinLoss {
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    WinLoss {
        wins,
        losses: trades.len() - wins,
    }
}

// ─── Filtering ─────────────────────────────────────────────────────

/// Trades whose symbol contains `filter`, ignoring case and surrounding
/// whitespace of the filter. Input order is preserved; an empty filter keeps
/// everything.
pub fn filter_by_symbol<'a>(trades: &'a [TradeRecord], filter: &str) -> Vec<&'a TradeRecord> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return trades.iter().collect();
    }
    trades
        .iter()
        .filter(|t| t.symbol.to_lowercase().contains(&needle))
        .collect()
}
