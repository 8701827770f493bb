//! tradedash core — trade-log CSV in, dashboard statistics and chart series out.
//!
//! Pipeline: [`parser`] → [`normalize`] → [`aggregate`], with an opportunistic
//! [`cache`] of the last loaded trade list. [`session::DashboardSession`] owns
//! the loaded state; drawing is left to a [`render::ChartRenderer`] supplied by
//! the consumer.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod connect;
pub mod domain;
pub mod export;
pub mod format;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod sample;
pub mod session;

pub use aggregate::{
    filter_by_symbol, summarize, ChartSeries, DailyPoint, DashboardSnapshot, EquityPoint,
    Statistics, WinLoss,
};
pub use cache::{FileStore, KeyValueStore, MemoryStore, StoreError, TradeCache};
pub use config::{ConfigError, DashboardConfig};
pub use connect::{ConnectionStatus, SimulatedConnector};
pub use domain::{RawRow, TradeRecord};
pub use format::{format_average, format_money, format_percent, NO_DATA};
pub use normalize::{normalize_row, normalize_rows, NormalizeError, ParseMode};
pub use parser::parse_csv;
pub use render::{Chart, ChartBoard, ChartRenderer};
pub use sample::EXAMPLE_CSV;
pub use session::{DashboardSession, LoadSource};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn trade_record_is_send_sync() {
        assert_send::<TradeRecord>();
        assert_sync::<TradeRecord>();
    }

    #[test]
    fn snapshot_types_are_send_sync() {
        assert_send::<DashboardSnapshot>();
        assert_sync::<DashboardSnapshot>();
        assert_send::<Statistics>();
        assert_sync::<Statistics>();
        assert_send::<ChartSeries>();
        assert_sync::<ChartSeries>();
    }

    #[test]
    fn session_is_send_sync() {
        assert_send::<DashboardSession>();
        assert_sync::<DashboardSession>();
        assert_send::<TradeCache>();
        assert_sync::<TradeCache>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<DashboardConfig>();
        assert_sync::<DashboardConfig>();
    }
}
