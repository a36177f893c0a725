use analytics::AnalyticsEngine;
use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{LoggingSettings, Settings, StorageBackend};
use core_types::{NewTrade, Side, UserId};
use database::{TradeStore, load_ledger};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use web_server::AppState;

mod display;

/// The main entry point for the Alpha Terminal trading journal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; DATABASE_URL may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(store) = cli.store {
        settings.storage.backend = store.into();
    }

    let _guard = init_tracing(&settings.logging)?;

    if let Err(e) = analytics::validate_account(&settings.account) {
        tracing::warn!(error = %e, "Account rules are inconsistent; affected metrics fall back to defaults.");
    }

    let store = database::open_store(&settings.storage)
        .await
        .context("Failed to open the trade store")?;
    let engine = AnalyticsEngine::new(settings.scoring.clone(), settings.targets.clone());

    match cli.command {
        Commands::Log(args) => handle_log(args, store.as_ref()).await,
        Commands::Dashboard(args) => handle_dashboard(args, &settings, &engine, store.as_ref()).await,
        Commands::Trades(args) => handle_trades(args, store.as_ref()).await,
        Commands::Calendar(args) => handle_calendar(args, store.as_ref()).await,
        Commands::Serve(args) => {
            let addr = args.addr.unwrap_or(settings.server.addr);
            let state = AppState {
                store,
                engine,
                account: settings.account.clone(),
            };
            web_server::run_server(addr, state).await
        }
    }
}

/// Sets up stdout and daily rolling file logging. The returned guard flushes the file on drop.
fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<WorkerGuard> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&logging.file_prefix)
        .build(&logging.directory)
        .with_context(|| format!("Failed to open log directory {}", logging.directory.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins over the configured level; sqlx statement logging stays quiet either way.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level))
        .add_directive("sqlx::query=warn".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    Ok(guard)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A trading journal with account-risk analytics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files are ignored.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the configured storage backend.
    #[arg(long, global = true, value_enum)]
    store: Option<StoreArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreArg {
    Json,
    Memory,
    Postgres,
}

impl From<StoreArg> for StorageBackend {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Json => StorageBackend::Json,
            StoreArg::Memory => StorageBackend::Memory,
            StoreArg::Postgres => StorageBackend::Postgres,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log a closed trade.
    Log(LogArgs),
    /// Show balance, drawdown, goal progress and the performance score.
    Dashboard(DashboardArgs),
    /// List logged trades, newest first.
    Trades(TradesArgs),
    /// Show daily P&L for one month.
    Calendar(CalendarArgs),
    /// Run the JSON API server.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct LogArgs {
    /// The journal owner.
    #[arg(long, short)]
    user: String,

    /// The instrument traded (e.g., "NQ").
    #[arg(long)]
    symbol: String,

    /// Realized profit or loss of the trade.
    #[arg(long, allow_hyphen_values = true)]
    pnl: Decimal,

    /// "long" or "short".
    #[arg(long, default_value = "long")]
    side: Side,

    /// The trade date (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    r_multiple: Option<Decimal>,

    #[arg(long)]
    setup: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

#[derive(Parser)]
struct DashboardArgs {
    #[arg(long, short)]
    user: String,

    /// Print the raw metrics as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Include the per-trade equity curve.
    #[arg(long)]
    equity: bool,
}

#[derive(Parser)]
struct TradesArgs {
    #[arg(long, short)]
    user: String,

    /// Only show the most recent N trades.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Parser)]
struct CalendarArgs {
    #[arg(long, short)]
    user: String,

    /// Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// 1-12. Defaults to the current month.
    #[arg(long)]
    month: Option<u32>,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.addr` from the configuration.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_log(args: LogArgs, store: &dyn TradeStore) -> anyhow::Result<()> {
    let user = UserId::new(args.user)?;
    let trade = NewTrade {
        date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
        symbol: args.symbol,
        pnl: args.pnl,
        side: args.side,
        r_multiple: args.r_multiple,
        setup: args.setup,
        notes: args.notes,
    };

    let record = store.append(&user, trade).await.context("Failed to log trade")?;
    tracing::info!(user = %user, trade_id = %record.id, "Trade logged.");
    println!(
        "Logged {} {} {} on {}.",
        record.side,
        record.symbol,
        display::format_currency(record.pnl),
        record.date
    );
    Ok(())
}

async fn handle_dashboard(
    args: DashboardArgs,
    settings: &Settings,
    engine: &AnalyticsEngine,
    store: &dyn TradeStore,
) -> anyhow::Result<()> {
    let user = UserId::new(args.user)?;
    let ledger = load_ledger(store, &user).await?;
    let metrics = engine.compute(&settings.account, &ledger);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("Dashboard for {user}");
    println!("{}", display::summary_table(&metrics));
    println!("{}", display::score_table(&metrics));
    if args.equity && !metrics.equity_curve.is_empty() {
        println!("{}", display::equity_table(&metrics));
    }
    Ok(())
}

async fn handle_trades(args: TradesArgs, store: &dyn TradeStore) -> anyhow::Result<()> {
    let user = UserId::new(args.user)?;
    let ledger = load_ledger(store, &user).await?;
    let mut log = analytics::trade_log(&ledger);
    if let Some(limit) = args.limit {
        log.truncate(limit);
    }

    if log.is_empty() {
        println!("No trades logged for {user}.");
    } else {
        println!("{}", display::trades_table(&log));
    }
    Ok(())
}

async fn handle_calendar(args: CalendarArgs, store: &dyn TradeStore) -> anyhow::Result<()> {
    let user = UserId::new(args.user)?;
    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let ledger = load_ledger(store, &user).await?;
    let calendar = analytics::month_calendar(&analytics::daily_pnl(&ledger), year, month)?;

    println!("{year}-{month:02} for {user}");
    println!("{}", display::calendar_table(&calendar));
    println!(
        "Total {} over {} trading days ({} green, {} red)",
        display::format_currency(calendar.total_pnl),
        calendar.trading_days,
        calendar.green_days,
        calendar.red_days
    );
    Ok(())
}
