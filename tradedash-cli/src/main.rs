//! tradedash CLI — summarize, tabulate and export trade logs.
//!
//! Commands:
//! - `summary` — statistics, text charts and the (filtered) trade table
//! - `table` — the (filtered) trade table only
//! - `export` — trades, equity curve and daily P/L as CSV files
//! - `cache status` / `cache clear` — inspect or drop the cached trade list
//! - `connect` — simulated broker connection (no network access)

mod text_render;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use tradedash_core::export::{
    export_daily_csv, export_equity_csv, export_trades_csv, write_artifact,
};
use tradedash_core::format::{format_average, format_money, format_percent};
use tradedash_core::render::ChartBoard;
use tradedash_core::{
    ConnectionStatus, DashboardConfig, DashboardSession, FileStore, ParseMode,
    SimulatedConnector, TradeCache, TradeRecord,
};

use crate::text_render::TextRenderer;

const BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(
    name = "tradedash",
    about = "tradedash — trade log statistics and charts in the terminal"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Where trades come from. With neither flag, the cached trade list is used.
#[derive(Args)]
struct InputArgs {
    /// CSV file to load.
    #[arg(long, conflicts_with = "example")]
    file: Option<PathBuf>,

    /// Load the built-in example dataset.
    #[arg(long, default_value_t = false)]
    example: bool,

    /// Reject non-numeric qty/price/pl cells instead of treating them as 0.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Neither read nor write the trade cache.
    #[arg(long, default_value_t = false)]
    no_cache: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics, charts and the trade table.
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Case-insensitive symbol substring for the table.
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Print the trade table only.
    Table {
        #[command(flatten)]
        input: InputArgs,

        /// Case-insensitive symbol substring.
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Write trades.csv, equity.csv and daily.csv.
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory.
        #[arg(long, default_value = "exports")]
        out: PathBuf,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Simulate connecting to a broker API.
    Connect {
        /// API key; empty fails immediately.
        #[arg(long, default_value = "")]
        api_key: String,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Report what is cached and where.
    Status,
    /// Remove the cached trade list.
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        config.validate()?;
    }
    init_logging(&config.logging.level);
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Summary { input, filter } => run_summary(&config, &input, &filter),
        Commands::Table { input, filter } => run_table(&config, &input, &filter),
        Commands::Export { input, out } => run_export(&config, &input, &out),
        Commands::Cache { action } => match action {
            CacheAction::Status => run_cache_status(&config),
            CacheAction::Clear => run_cache_clear(&config),
        },
        Commands::Connect { api_key } => run_connect(&config, &api_key),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn trade_cache(config: &DashboardConfig) -> TradeCache {
    TradeCache::new(FileStore::new(config.cache.resolved_dir()))
}

/// Build a session and load trades per `input`.
fn load_session(config: &DashboardConfig, input: &InputArgs) -> Result<DashboardSession> {
    let mode = if input.strict {
        ParseMode::Strict
    } else {
        config.parse.mode
    };
    let mut session = DashboardSession::new(mode);
    if config.cache.enabled && !input.no_cache {
        session = session.with_cache(trade_cache(config));
    }

    if let Some(path) = &input.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        session
            .load_csv(&text)
            .with_context(|| format!("failed to load {}", path.display()))?;
    } else if input.example {
        session.load_example();
    } else if input.no_cache {
        bail!("--no-cache requires --file or --example");
    } else if !session.restore_from_cache() {
        bail!("no input: pass --file or --example (nothing cached yet)");
    }
    Ok(session)
}

fn run_summary(config: &DashboardConfig, input: &InputArgs, filter: &str) -> Result<()> {
    let mut session = load_session(config, input)?;
    session.set_filter(filter);

    print_summary(&session);

    let mut board = ChartBoard::new(TextRenderer::new(BAR_WIDTH));
    board.show(session.snapshot());
    for panel in board.renderer().panels() {
        println!("{panel}");
    }

    print_table(&session);
    Ok(())
}

fn run_table(config: &DashboardConfig, input: &InputArgs, filter: &str) -> Result<()> {
    let mut session = load_session(config, input)?;
    session.set_filter(filter);
    print_table(&session);
    Ok(())
}

fn run_export(config: &DashboardConfig, input: &InputArgs, out: &Path) -> Result<()> {
    let session = load_session(config, input)?;
    let Some(snapshot) = session.snapshot() else {
        bail!("no trades loaded; nothing to export");
    };

    let files = [
        ("trades.csv", export_trades_csv(session.trades())?),
        ("equity.csv", export_equity_csv(&snapshot.series.equity)?),
        ("daily.csv", export_daily_csv(&snapshot.series.daily)?),
    ];
    for (name, contents) in &files {
        let path = write_artifact(out, name, contents)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_cache_status(config: &DashboardConfig) -> Result<()> {
    let dir = config.cache.resolved_dir();
    if !config.cache.enabled {
        println!("Cache is disabled in config.");
        return Ok(());
    }
    println!("Cache: {}", dir.display());

    match trade_cache(config).load() {
        Some(cached) => {
            let local = cached.saved_at.with_timezone(&chrono::Local);
            println!("Trades: {}", cached.trades.len());
            println!("Saved:  {}", local.format("%Y-%m-%d %H:%M:%S"));
            println!("Schema: v{}", cached.schema_version);
        }
        None => println!("Cache is empty."),
    }
    Ok(())
}

fn run_cache_clear(config: &DashboardConfig) -> Result<()> {
    trade_cache(config).clear();
    println!("Cleared: {}", config.cache.resolved_dir().display());
    Ok(())
}

fn run_connect(config: &DashboardConfig, api_key: &str) -> Result<()> {
    let connector = SimulatedConnector::new(config.connect.delay());
    let status = connector.connect(api_key, |status| println!("{status}"));
    if let ConnectionStatus::Error(reason) = status {
        bail!("connection failed: {reason}");
    }
    Ok(())
}

fn print_summary(session: &DashboardSession) {
    let Some(stats) = session.stats() else {
        println!("No trades loaded.");
        return;
    };

    println!();
    println!("=== Trade Summary ===");
    println!("Total P/L:      {}", format_money(stats.total_pl));
    println!("Trades:         {}", stats.trade_count);
    println!("Wins:           {}", stats.win_count);
    println!("Losses:         {}", stats.loss_count);
    println!("Win Rate:       {}", format_percent(stats.win_rate));
    println!("Avg Win:        {}", format_average(stats.avg_win));
    println!("Avg Loss:       {}", format_average(stats.avg_loss));
    println!();
}

fn print_table(session: &DashboardSession) {
    let rows = session.visible_trades();
    if !session.filter().trim().is_empty() {
        println!(
            "Filter: '{}' ({} of {} trades)",
            session.filter(),
            rows.len(),
            session.trades().len()
        );
    }
    if rows.is_empty() {
        println!("No trades to show.");
        return;
    }

    println!(
        "{:<18} {:<8} {:<5} {:>12} {:>8} {:>12}",
        "Time", "Symbol", "Side", "Price", "Qty", "P/L"
    );
    println!("{}", "-".repeat(68));
    for t in rows {
        print_row(t);
    }
}

fn print_row(t: &TradeRecord) {
    println!(
        "{:<18} {:<8} {:<5} {:>12.2} {:>8} {:>12}",
        t.time,
        t.symbol,
        t.side,
        t.price,
        t.qty,
        format_money(t.pl)
    );
}
