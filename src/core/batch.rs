//! Multi-coin runs where one coin's failure never aborts the others

use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::core::context::RunContext;
use crate::core::runner::{RunReport, StrategyRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCoin {
    pub coin: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub completed: Vec<RunReport>,
    pub skipped: Vec<SkippedCoin>,
}

impl BatchReport {
    pub fn notified(&self) -> usize {
        self.completed.iter().filter(|r| r.notified).count()
    }
}

/// Evaluate every coin, at most `runner.config().concurrency` at a time.
/// Reports keep the order of `coins`.
pub async fn run_batch(
    runner: &StrategyRunner,
    ctx: &RunContext,
    coins: &[String],
    interval: &str,
) -> BatchReport {
    let concurrency = runner.config().concurrency.max(1);
    info!(
        coins = coins.len(),
        concurrency = concurrency,
        interval = %interval,
        "Batch: evaluating {} coins",
        coins.len()
    );

    // Built up front so the batch future stays Send inside tokio::spawn
    let runs: Vec<_> = coins
        .iter()
        .map(|coin| async move { (coin, runner.run_for_coin(ctx, coin, interval).await) })
        .collect();
    let results: Vec<_> = stream::iter(runs)
        .buffered(concurrency)
        .collect()
        .await;

    let mut report = BatchReport::default();
    for (coin, result) in results {
        match result {
            Ok(run) => report.completed.push(run),
            Err(e) => {
                warn!(coin = %coin, error = %e, "Batch: skipping {}", coin);
                report.skipped.push(SkippedCoin {
                    coin: coin.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        completed = report.completed.len(),
        skipped = report.skipped.len(),
        notified = report.notified(),
        "Batch: finished"
    );
    report
}
