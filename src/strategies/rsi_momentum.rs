//! RSI momentum confirmation strategy.
//!
//! Emits a trade only when the forecast target clears the round-trip fees and
//! the RSI of recent candle closes agrees with the direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, warn};

use crate::indicators::momentum::{calculate_rsi, DEFAULT_RSI_PERIOD};
use crate::models::prices::{CloseSeries, PriceSeries};
use crate::models::signal::{Action, Directive};
use crate::signals::decision::{round_to, StopLossTakeProfit};
use crate::strategies::{Strategy, StrategyInput};

const PRICE_DECIMALS: u32 = 6;
const RSI_DECIMALS: u32 = 2;

pub const REASON_INSUFFICIENT_DATA: &str = "Insufficient data";
pub const REASON_NO_VALID_CLOSES: &str = "No valid close prices";
pub const REASON_RSI_NOT_READY: &str = "RSI not ready";
pub const REASON_RSI_FAILURE: &str = "Exception in RSI strategy";
pub const REASON_BAD_PRICE_DATA: &str = "Bad price data";

/// Tag recorded on signals this strategy confirms
pub const CONFIRMATION_TAG: &str = "RSI";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiMomentumConfig {
    pub fee_pct: f64,
    /// RSI above this confirms a BUY; below `100 - threshold` confirms a SHORT
    pub rsi_threshold: f64,
    pub rsi_period: u32,
}

impl Default for RsiMomentumConfig {
    fn default() -> Self {
        Self {
            fee_pct: 0.005,
            rsi_threshold: 55.0,
            rsi_period: DEFAULT_RSI_PERIOD,
        }
    }
}

impl RsiMomentumConfig {
    /// Round-trip fees; the RSI confirmation stands in for any extra margin
    pub fn min_gain(&self) -> f64 {
        2.0 * self.fee_pct
    }
}

#[derive(Debug, Clone, Default)]
pub struct RsiMomentumStrategy {
    config: RsiMomentumConfig,
}

impl RsiMomentumStrategy {
    pub fn new(config: RsiMomentumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RsiMomentumConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        historical: &PriceSeries,
        forecast: &PriceSeries,
        closes: &CloseSeries,
    ) -> Directive {
        if forecast.len() < 2 || historical.is_empty() || closes.is_empty() {
            info!(
                historical_len = historical.len(),
                forecast_len = forecast.len(),
                closes_len = closes.len(),
                "RSI: insufficient data"
            );
            return Directive::hold_because(REASON_INSUFFICIENT_DATA);
        }

        let cleaned = closes.cleaned();
        if cleaned.is_empty() {
            info!(before = closes.len(), "RSI: no valid close prices after cleaning");
            return Directive::hold_because(REASON_NO_VALID_CLOSES);
        }
        if cleaned.len() != closes.len() {
            debug!(
                before = closes.len(),
                after = cleaned.len(),
                "RSI: dropped {} invalid closes",
                closes.len() - cleaned.len()
            );
        }

        let latest_rsi = match calculate_rsi(&cleaned, self.config.rsi_period) {
            Ok(Some(rsi)) if rsi.value.is_finite() => rsi.value,
            Ok(_) => {
                info!(closes = cleaned.len(), "RSI: not ready");
                return Directive::hold_because(REASON_RSI_NOT_READY);
            }
            Err(e) => {
                error!(error = %e, "RSI: indicator computation failed");
                return Directive::hold_because(REASON_RSI_FAILURE);
            }
        };

        let rsi = round_to(latest_rsi, RSI_DECIMALS);
        let (entry, target) = match (historical.last(), forecast.last()) {
            (Some(h), Some(f)) if h.price.is_finite() && f.price.is_finite() => (h.price, f.price),
            _ => {
                warn!("RSI: non-finite entry or target price");
                return Directive::hold_because(REASON_BAD_PRICE_DATA).with_indicator(rsi);
            }
        };

        let min_gain = self.config.min_gain();
        let threshold = self.config.rsi_threshold;
        debug!(
            entry = entry,
            target = target,
            min_gain = min_gain,
            rsi = latest_rsi,
            threshold = threshold,
            "RSI: evaluating (rsi={:.2}, threshold={:.2})",
            latest_rsi,
            threshold
        );

        let action = if target > entry * (1.0 + min_gain) && latest_rsi > threshold {
            Action::Buy
        } else if target < entry * (1.0 - min_gain) && latest_rsi < 100.0 - threshold {
            Action::Short
        } else {
            Action::Hold
        };

        let directive = match StopLossTakeProfit::for_action(action, entry, min_gain, 2.0 * min_gain)
        {
            Some(levels) if levels.is_finite() => levels
                .rounded(PRICE_DECIMALS)
                .into_directive(action)
                .with_indicator(rsi),
            Some(_) => {
                warn!(min_gain = min_gain, "RSI: non-finite {} levels", action);
                Directive::hold_because(REASON_BAD_PRICE_DATA).with_indicator(rsi)
            }
            None => Directive::hold().with_indicator(rsi),
        };

        info!(
            action = %directive.action,
            rsi = rsi,
            entry = ?directive.entry,
            "RSI: {}",
            directive.action
        );
        directive
    }
}

impl fmt::Display for RsiMomentumStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RSIMomentumStrategy(fee_pct={}, rsi_threshold={})",
            self.config.fee_pct, self.config.rsi_threshold
        )
    }
}

impl Strategy for RsiMomentumStrategy {
    fn name(&self) -> &str {
        "RSIMomentumStrategy"
    }

    fn evaluate_input(&self, input: &StrategyInput<'_>) -> Directive {
        match input.closes {
            Some(closes) => self.evaluate(input.historical, input.forecast, closes),
            None => Directive::hold_because(REASON_INSUFFICIENT_DATA),
        }
    }

    fn justification_text(&self, signal: &Directive) -> String {
        let Some(rsi) = signal.indicator_value else {
            return "RSI not available.".to_string();
        };

        let threshold = self.config.rsi_threshold;
        match signal.action {
            Action::Buy => format!(
                "RSI {:.2} is above threshold {:.2}, indicating bullish momentum.",
                rsi, threshold
            ),
            Action::Short => format!(
                "RSI {:.2} is below {:.2}, indicating bearish momentum.",
                rsi,
                100.0 - threshold
            ),
            Action::Hold => format!(
                "RSI {:.2} did not confirm a strong move against threshold {:.2}, momentum inconclusive.",
                rsi, threshold
            ),
        }
    }
}
