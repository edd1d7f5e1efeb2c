//! Single coin × interval evaluation run
//!
//! fetch prediction + closes → forecast and RSI strategies → persist each →
//! reconcile → persist combined → notify when confirmed

use chrono::{Duration, Utc};
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::core::context::RunContext;
use crate::db::store::SignalRecord;
use crate::error::RunError;
use crate::models::prices::CloseSeries;
use crate::models::signal::{ConfirmedSignal, Directive};
use crate::services::predictions::PredictionPackage;
use crate::signals::reconcile::SignalReconciler;
use crate::strategies::{ForecastStrategy, RsiMomentumStrategy, Strategy};

/// Directives from both strategies and the reconciled result
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub forecast: Directive,
    pub momentum: Directive,
    pub signal: ConfirmedSignal,
}

/// Outcome of one coin's run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub coin: String,
    pub interval: String,
    pub evaluation: Evaluation,
    pub notified: bool,
    pub store_failures: usize,
}

pub struct StrategyRunner {
    config: EngineConfig,
    forecast: ForecastStrategy,
    rsi: RsiMomentumStrategy,
    reconciler: SignalReconciler,
}

impl StrategyRunner {
    pub fn new(config: EngineConfig) -> Self {
        let forecast = ForecastStrategy::new(config.forecast.clone());
        let rsi = RsiMomentumStrategy::new(config.rsi.clone());
        Self {
            config,
            forecast,
            rsi,
            reconciler: SignalReconciler::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Model name the reconciled signal is stored under
    pub fn combined_model_name(&self) -> String {
        format!("{}+{}", self.config.model, self.rsi.name())
    }

    /// Run both strategies and reconcile; no I/O
    pub fn evaluate(&self, package: &PredictionPackage, closes: &CloseSeries) -> Evaluation {
        info!(strategy = %self.forecast, "Evaluating forecast strategy");
        let forecast = self.forecast.evaluate(&package.historical, &package.forecast);

        info!(strategy = %self.rsi, "Evaluating RSI strategy");
        let momentum = self
            .rsi
            .evaluate(&package.historical, &package.forecast, closes);

        let signal = self.reconciler.reconcile(&forecast, &momentum);
        Evaluation {
            forecast,
            momentum,
            signal,
        }
    }

    pub async fn run_for_coin(
        &self,
        ctx: &RunContext,
        coin: &str,
        interval: &str,
    ) -> Result<RunReport, RunError> {
        let model = self.config.model.as_str();
        info!(
            coin = %coin,
            interval = %interval,
            since_days = self.config.since_days,
            model = %model,
            "Starting run for {}",
            coin
        );

        let end = Utc::now();
        let start = end - Duration::days(self.config.since_days);

        let package = ctx
            .predictions
            .latest_prediction(coin, interval, model)
            .await
            .map_err(|source| RunError::Predictions {
                coin: coin.to_string(),
                source,
            })?;
        debug!(
            coin = %coin,
            historical = package.historical.len(),
            forecast = package.forecast.len(),
            metadata_keys = ?package.metadata.keys().collect::<Vec<_>>(),
            "Fetched prediction package"
        );

        let closes = ctx
            .market_data
            .get_closes(coin, start, end, interval)
            .await
            .map_err(|source| RunError::MarketData {
                coin: coin.to_string(),
                source,
            })?;
        debug!(coin = %coin, rows = closes.len(), "Fetched candle closes");

        let evaluation = self.evaluate(&package, &closes);

        let mut store_failures = 0;
        let records = [
            (model.to_string(), SignalRecord::from(evaluation.forecast.clone())),
            (self.rsi.name().to_string(), SignalRecord::from(evaluation.momentum.clone())),
            (self.combined_model_name(), SignalRecord::from(evaluation.signal.clone())),
        ];
        for (model_name, record) in &records {
            if !self.persist(ctx, coin, model_name, record).await {
                store_failures += 1;
            }
        }

        info!(
            coin = %coin,
            action = %evaluation.signal.action,
            source = ?evaluation.signal.source,
            "Final decision for {}: {}",
            coin,
            evaluation.signal.action
        );

        let notified = self.notify(ctx, coin, &evaluation.signal).await;

        info!(coin = %coin, interval = %interval, "Run finished for {}", coin);
        Ok(RunReport {
            coin: coin.to_string(),
            interval: interval.to_string(),
            evaluation,
            notified,
            store_failures,
        })
    }

    /// Best-effort save; returns false when the store rejected the record
    async fn persist(
        &self,
        ctx: &RunContext,
        coin: &str,
        model_name: &str,
        record: &SignalRecord,
    ) -> bool {
        let Some(ref store) = ctx.store else {
            return true;
        };

        match store.save_signal(coin, model_name, record).await {
            Ok(()) => {
                debug!(coin = %coin, model_name = %model_name, "Saved {} signal", model_name);
                true
            }
            Err(e) => {
                error!(
                    coin = %coin,
                    model_name = %model_name,
                    error = %e,
                    "Failed to save {} signal for {}",
                    model_name,
                    coin
                );
                false
            }
        }
    }

    async fn notify(&self, ctx: &RunContext, coin: &str, signal: &ConfirmedSignal) -> bool {
        if !signal.is_actionable() {
            info!(coin = %coin, "No notification (not a confirmed BUY/SHORT)");
            return false;
        }
        let Some(ref notifier) = ctx.notifier else {
            debug!(coin = %coin, "No notifier configured");
            return false;
        };

        let confirmations: [&dyn Strategy; 2] = [&self.forecast, &self.rsi];
        match notifier.send_signal(coin, signal, &confirmations).await {
            Ok(sent) => {
                if sent && !self.config.notify_cooldown.is_zero() {
                    tokio::time::sleep(self.config.notify_cooldown).await;
                }
                sent
            }
            Err(e) => {
                error!(coin = %coin, error = %e, "Failed to send notification for {}", coin);
                false
            }
        }
    }
}
