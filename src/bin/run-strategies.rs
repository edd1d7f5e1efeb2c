//! Confluence single-run CLI
//!
//! Runs the forecast and RSI strategies for one symbol (or every tracked
//! symbol with `--all`), saves each strategy's signal and the combined one,
//! and sends a notification when the combined signal is a confirmed BUY/SHORT.

use clap::Parser;
use confluence::config::{get_environment, get_telegram_config, EngineConfig};
use confluence::core::{run_batch, RunContext, StrategyRunner};
use confluence::db::SignalDatabase;
use confluence::logging;
use confluence::services::{CoinCatalog, TelegramNotifier};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "run-strategies", about = "Run strategies and emit signals")]
struct Args {
    /// Single symbol, e.g. BTCUSDT
    #[arg(long, required_unless_present = "all")]
    symbol: Option<String>,

    /// Evaluate every tracked symbol from the coin catalog
    #[arg(long, conflicts_with = "symbol")]
    all: bool,

    /// History window in days
    #[arg(long, default_value_t = 21)]
    since_days: i64,

    /// Kline interval
    #[arg(long, default_value = "1h")]
    interval: String,

    /// DEBUG, INFO, WARN, ERROR
    #[arg(long, default_value = "INFO")]
    log_level: String,

    /// Optional log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let args = Args::parse();
    logging::init_logging(&args.log_level, args.log_file.as_deref())?;

    info!(
        symbol = ?args.symbol,
        all = args.all,
        interval = %args.interval,
        since_days = args.since_days,
        environment = %get_environment(),
        "Starting Confluence run"
    );

    let mut config = EngineConfig::from_env();
    config.since_days = args.since_days;
    config.interval = args.interval.clone();

    let database = Arc::new(SignalDatabase::new().await?);
    info!("Postgres connected");

    let mut context = RunContext::new(database.clone(), database.clone()).with_store(database.clone());
    match get_telegram_config() {
        Some(telegram) => {
            context = context.with_notifier(Arc::new(TelegramNotifier::new(&telegram)));
        }
        None => warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHANNEL_ID not set - notifications disabled"),
    }

    let runner = StrategyRunner::new(config);

    if args.all {
        let coins = database.tracked_coins().await?;
        let report = run_batch(&runner, &context, &coins, &args.interval).await;
        for skipped in &report.skipped {
            warn!(coin = %skipped.coin, error = %skipped.error, "Skipped {}", skipped.coin);
        }
        return Ok(());
    }

    let symbol = args.symbol.unwrap_or_default();
    if let Err(e) = runner.run_for_coin(&context, &symbol, &args.interval).await {
        error!(coin = %symbol, error = %e, "Fatal error processing {}", symbol);
        return Err(e.into());
    }

    Ok(())
}
