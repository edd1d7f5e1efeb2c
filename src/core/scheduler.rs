//! Cron-based scheduler for periodic batch runs

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::core::batch::run_batch;
use crate::core::context::RunContext;
use crate::core::runner::StrategyRunner;
use crate::services::market_data::CoinCatalog;

/// Cron expression firing every `interval_seconds`
///
/// Cron format: second minute hour day month weekday
pub fn cron_expression(interval_seconds: u64) -> String {
    if interval_seconds >= 60 {
        let minutes = interval_seconds / 60;
        format!("0 */{} * * * *", minutes)
    } else {
        format!("*/{} * * * * *", interval_seconds)
    }
}

/// Scheduler that periodically runs a batch over the tracked coins
pub struct BatchScheduler {
    runner: Arc<StrategyRunner>,
    context: Arc<RunContext>,
    catalog: Arc<dyn CoinCatalog>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl BatchScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `runner` - Strategy runner shared by every tick
    /// * `context` - Collaborators for each run
    /// * `catalog` - Source of the coins to evaluate, re-read on every tick
    /// * `interval_seconds` - Evaluation interval in seconds (0 = disabled)
    pub fn new(
        runner: Arc<StrategyRunner>,
        context: Arc<RunContext>,
        catalog: Arc<dyn CoinCatalog>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        let cron_expr = cron_expression(interval_seconds);
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "BatchScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            runner,
            context,
            catalog,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let runner = self.runner.clone();
        let context = self.context.clone();
        let catalog = self.catalog.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("BatchScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                let coins = match catalog.tracked_coins().await {
                    Ok(coins) => coins,
                    Err(e) => {
                        error!(error = %e, "BatchScheduler: failed to load tracked coins");
                        continue;
                    }
                };

                info!(
                    coin_count = coins.len(),
                    "BatchScheduler: cron tick, evaluating {} coins",
                    coins.len()
                );
                let interval = runner.config().interval.clone();
                run_batch(&runner, &context, &coins, &interval).await;
            }
        });

        let mut h = self.handle.write().await;
        *h = Some(handle);
        info!("BatchScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("BatchScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
