//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Row preservation — N data lines produce N trade records
//! 2. Equity identity — the last equity point equals total P/L
//! 3. Partition — wins + losses == trades, flat trades are losses
//! 4. Filter projection — never reorders, empty filter is identity
//! 5. Numerics — qty/price/pl are always finite, whatever the cell text

use proptest::prelude::*;
use tradedash_core::aggregate::summarize;
use tradedash_core::{filter_by_symbol, normalize_rows, parse_csv, ParseMode, TradeRecord};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_pl() -> impl Strategy<Value = f64> {
    (-5000.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_time() -> impl Strategy<Value = String> {
    (1..=28u32, 0..24u32, 0..60u32)
        .prop_map(|(d, h, m)| format!("2025-01-{d:02} {h:02}:{m:02}"))
}

fn arb_symbol() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ES", "NQ", "MES", "CL", "gc"]).prop_map(String::from)
}

fn arb_line() -> impl Strategy<Value = String> {
    (arb_time(), arb_symbol(), arb_pl())
        .prop_map(|(time, symbol, pl)| format!("{time},{symbol},BUY,100.0,1,{pl}"))
}

fn arb_csv() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(arb_line(), 0..40).prop_map(|lines| {
        let n = lines.len();
        let mut text = String::from("time,symbol,side,price,qty,pl\n");
        text.push_str(&lines.join("\n"));
        text.push_str("\n\n");
        (text, n)
    })
}

fn load(text: &str) -> Vec<TradeRecord> {
    normalize_rows(&parse_csv(text), ParseMode::Lenient).unwrap()
}

// ── 1. Row preservation ──────────────────────────────────────────────

proptest! {
    #[test]
    fn row_count_is_preserved((text, n) in arb_csv()) {
        prop_assert_eq!(load(&text).len(), n);
    }

    #[test]
    fn crlf_does_not_change_row_count((text, n) in arb_csv()) {
        let crlf = text.replace('\n', "\r\n");
        prop_assert_eq!(load(&crlf).len(), n);
    }
}

// ── 2–3. Aggregate identities ────────────────────────────────────────

proptest! {
    #[test]
    fn equity_ends_at_total_pl((text, n) in arb_csv()) {
        prop_assume!(n > 0);
        let mut trades = load(&text);
        let snapshot = summarize(&mut trades).unwrap();
        let last = snapshot.series.equity.last().unwrap().cumulative;
        prop_assert!((last - snapshot.stats.total_pl).abs() < 1e-6);
        prop_assert_eq!(snapshot.series.equity.len(), n);
    }

    #[test]
    fn daily_sums_add_up_to_total((text, n) in arb_csv()) {
        prop_assume!(n > 0);
        let mut trades = load(&text);
        let snapshot = summarize(&mut trades).unwrap();
        let daily_total: f64 = snapshot.series.daily.iter().map(|d| d.sum).sum();
        prop_assert!((daily_total - snapshot.stats.total_pl).abs() < 1e-6);
        let dates: Vec<&str> = snapshot.series.daily.iter().map(|d| d.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(dates, sorted);
    }

    #[test]
    fn wins_and_losses_partition_trades((text, n) in arb_csv()) {
        prop_assume!(n > 0);
        let mut trades = load(&text);
        let snapshot = summarize(&mut trades).unwrap();
        let stats = &snapshot.stats;
        prop_assert_eq!(stats.win_count + stats.loss_count, stats.trade_count);
        let flat = trades.iter().filter(|t| t.pl == 0.0).count();
        let negative = trades.iter().filter(|t| t.pl < 0.0).count();
        prop_assert_eq!(stats.loss_count, flat + negative);
        prop_assert!(stats.win_rate >= 0.0 && stats.win_rate <= 100.0);
    }

    #[test]
    fn trades_are_sorted_after_summarize((text, n) in arb_csv()) {
        prop_assume!(n > 0);
        let mut trades = load(&text);
        summarize(&mut trades);
        prop_assert!(trades.windows(2).all(|w| w[0].time <= w[1].time));
    }
}

// ── 4. Filter projection ─────────────────────────────────────────────

proptest! {
    #[test]
    fn filter_preserves_order((text, _n) in arb_csv(), needle in "[a-zA-Z]{0,2}") {
        let mut trades = load(&text);
        summarize(&mut trades);
        let hits = filter_by_symbol(&trades, &needle);
        let lower = needle.to_lowercase();
        prop_assert!(hits.iter().all(|t| t.symbol.to_lowercase().contains(&lower)));
        prop_assert!(hits.windows(2).all(|w| w[0].time <= w[1].time));
        let expected = trades
            .iter()
            .filter(|t| t.symbol.to_lowercase().contains(&lower))
            .count();
        prop_assert_eq!(hits.len(), expected);
    }
}

// ── 5. Numeric coercion ──────────────────────────────────────────────

proptest! {
    #[test]
    fn numerics_are_always_finite(qty in ".{0,12}", price in ".{0,12}", pl in ".{0,12}") {
        let clean = |s: &str| s.replace([',', '\n', '\r'], "");
        let text = format!(
            "symbol,qty,price,pl\nES,{},{},{}",
            clean(&qty),
            clean(&price),
            clean(&pl)
        );
        let trades = load(&text);
        prop_assert_eq!(trades.len(), 1);
        let t = &trades[0];
        prop_assert!(t.qty.is_finite() && t.price.is_finite() && t.pl.is_finite());
    }
}
