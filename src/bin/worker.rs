//! Confluence Worker
//!
//! Periodically evaluates every tracked coin on a cron schedule.

use confluence::config::{get_environment, get_telegram_config, EngineConfig};
use confluence::core::{BatchScheduler, RunContext, StrategyRunner};
use confluence::db::SignalDatabase;
use confluence::logging;
use confluence::services::TelegramNotifier;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_file = env::var("LOG_FILE").ok();
    logging::init_logging(&log_level, log_file.as_deref().map(std::path::Path::new))?;

    let eval_interval: u64 = env::var("EVAL_INTERVAL_SECONDS")
        .ok()
        .and_then(|i| i.parse().ok())
        .unwrap_or(0);

    info!("Starting Confluence Worker");
    info!(environment = %get_environment(), "Environment");

    if eval_interval == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }

    let config = EngineConfig::from_env();
    info!(
        model = %config.model,
        interval = %config.interval,
        concurrency = config.concurrency,
        "Signal evaluation: every {} seconds",
        eval_interval
    );

    info!("Initializing Postgres connection...");
    let database = Arc::new(
        SignalDatabase::new()
            .await
            .map_err(|e| format!("Postgres connection required for worker: {}", e))?,
    );
    info!("Postgres connected");

    let mut context = RunContext::new(database.clone(), database.clone()).with_store(database.clone());
    match get_telegram_config() {
        Some(telegram) => {
            context = context.with_notifier(Arc::new(TelegramNotifier::new(&telegram)));
        }
        None => warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHANNEL_ID not set - notifications disabled"),
    }

    let runner = Arc::new(StrategyRunner::new(config));
    let scheduler = BatchScheduler::new(runner, Arc::new(context), database, eval_interval)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    // Graceful shutdown
    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
