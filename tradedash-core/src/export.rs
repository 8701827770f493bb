//! CSV export of the trade table and chart series.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::aggregate::{DailyPoint, EquityPoint};
use crate::domain::TradeRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

type Writer = csv::Writer<Vec<u8>>;

fn finish(wtr: Writer) -> Result<String, ExportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Columns: time, symbol, side, price, qty, pl.
pub fn export_trades_csv<'a>(
    trades: impl IntoIterator<Item = &'a TradeRecord>,
) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["time", "symbol", "side", "price", "qty", "pl"])?;
    for t in trades {
        wtr.write_record([
            t.time.as_str(),
            t.symbol.as_str(),
            t.side.as_str(),
            &t.price.to_string(),
            &t.qty.to_string(),
            &format!("{:.2}", t.pl),
        ])?;
    }
    finish(wtr)
}

/// Columns: label, cumulative.
pub fn export_equity_csv(points: &[EquityPoint]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["label", "cumulative"])?;
    for p in points {
        wtr.write_record([p.label.as_str(), &format!("{:.2}", p.cumulative)])?;
    }
    finish(wtr)
}

/// Columns: date, pl.
pub fn export_daily_csv(points: &[DailyPoint]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "pl"])?;
    for p in points {
        wtr.write_record([p.date.as_str(), &format!("{:.2}", p.sum)])?;
    }
    finish(wtr)
}

/// Write `contents` to `dir/name`, creating `dir` if needed.
pub fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
