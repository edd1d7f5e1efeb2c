//! Forecast trend strategy.
//!
//! Acts on a model forecast only when the projected move clears a fee-derived
//! threshold and an absolute floor, the trailing forecast points agree on the
//! direction, and the forecast path never touches the stop level on the way.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::models::prices::{PricePoint, PriceSeries};
use crate::models::signal::{Action, Directive};
use crate::signals::decision::StopLossTakeProfit;
use crate::strategies::{Strategy, StrategyInput};

const PRICE_DECIMALS: u32 = 4;

pub const REASON_INSUFFICIENT_DATA: &str = "Insufficient data";
pub const REASON_NOT_ENOUGH_POINTS: &str = "Not enough forecast points";
pub const REASON_BAD_PRICE_DATA: &str = "Bad price data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// One-way trading cost as a fraction of price
    pub fee_pct: f64,
    pub extra_gain: f64,
    pub extra_loss: f64,
    /// Trailing forecast points considered; earlier points are less certain
    pub label_width: usize,
    /// When false the whole forecast is used instead of the last `label_width` points
    pub use_forecast_only: bool,
    /// Absolute floor on the required move, whatever the fees
    pub min_abs_gain_pct: f64,
    pub vote_window: usize,
    /// Require every point in the vote window to agree
    pub vote_strict: bool,
    /// Dissenting points tolerated when `vote_strict` is off
    pub vote_slack: usize,
    /// Reject directives whose forecast path crosses the stop level
    pub enforce_path_stop: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            fee_pct: 0.002,
            extra_gain: 0.005,
            extra_loss: 0.01,
            label_width: 12,
            use_forecast_only: true,
            min_abs_gain_pct: 0.002,
            vote_window: 5,
            vote_strict: true,
            vote_slack: 1,
            enforce_path_stop: true,
        }
    }
}

impl ForecastConfig {
    /// Fee-covering gain: round-trip fees plus the gain margin
    pub fn min_gain(&self) -> f64 {
        2.0 * self.fee_pct + self.extra_gain
    }

    /// Stop distance: round-trip fees plus the loss margin
    pub fn min_loss(&self) -> f64 {
        2.0 * self.fee_pct + self.extra_loss
    }

    /// Minimum move, in either direction, needed to act
    pub fn required_gain_pct(&self) -> f64 {
        self.min_gain().max(self.min_abs_gain_pct)
    }

    /// Trailing `vote_window` points of `preds`; a window of 0 votes over all of them
    pub fn vote_slice<'a>(&self, preds: &'a [PricePoint]) -> &'a [PricePoint] {
        if self.vote_window == 0 {
            return preds;
        }
        &preds[preds.len().saturating_sub(self.vote_window)..]
    }

    /// Votes needed out of a window of `window_len` points
    pub fn required_votes(&self, window_len: usize) -> usize {
        if self.vote_strict {
            window_len
        } else {
            window_len.saturating_sub(self.vote_slack).max(1)
        }
    }
}

/// Which gates passed for each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gates {
    buy_move: bool,
    buy_votes: bool,
    buy_path: bool,
    short_move: bool,
    short_votes: bool,
    short_path: bool,
}

impl Gates {
    fn buy(&self) -> bool {
        self.buy_move && self.buy_votes && self.buy_path
    }

    fn short(&self) -> bool {
        self.short_move && self.short_votes && self.short_path
    }

    /// Comma-joined list of the gates that blocked a trade
    fn hold_reason(&self) -> String {
        let mut reasons = Vec::new();
        if !self.buy_move && !self.short_move {
            reasons.push("move<required");
        }
        if self.buy_move && !self.buy_votes {
            reasons.push("buy_votes<required");
        }
        if self.short_move && !self.short_votes {
            reasons.push("short_votes<required");
        }
        if self.buy_move && self.buy_votes && !self.buy_path {
            reasons.push("buy_path_hits_stop");
        }
        if self.short_move && self.short_votes && !self.short_path {
            reasons.push("short_path_hits_stop");
        }

        if reasons.is_empty() {
            "no_signal".to_string()
        } else {
            reasons.join(",")
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastStrategy {
    config: ForecastConfig,
}

impl ForecastStrategy {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn evaluate(&self, historical: &PriceSeries, forecast: &PriceSeries) -> Directive {
        if historical.is_empty() || forecast.len() < 2 {
            info!(
                historical_len = historical.len(),
                forecast_len = forecast.len(),
                "Forecast: insufficient data (historical={}, forecast={})",
                historical.len(),
                forecast.len()
            );
            return Directive::hold_because(REASON_INSUFFICIENT_DATA);
        }

        let preds: &[PricePoint] = if self.config.use_forecast_only {
            forecast.tail(self.config.label_width)
        } else {
            forecast.points()
        };
        if preds.len() < 2 {
            info!(
                preds_len = preds.len(),
                label_width = self.config.label_width,
                "Forecast: not enough forecast points after slicing"
            );
            return Directive::hold_because(REASON_NOT_ENOUGH_POINTS);
        }

        let entry = match historical.last() {
            Some(point) => point.price,
            None => return Directive::hold_because(REASON_INSUFFICIENT_DATA),
        };
        if !entry.is_finite() || preds.iter().any(|p| !p.price.is_finite()) {
            warn!(entry = entry, "Forecast: non-finite price in historical/forecast series");
            return Directive::hold_because(REASON_BAD_PRICE_DATA);
        }
        let end = preds[preds.len() - 1].price;

        let required_gain_pct = self.config.required_gain_pct();
        let min_loss = self.config.min_loss();

        let window = self.config.vote_slice(preds);
        let up_votes = window.iter().filter(|p| p.price > entry).count();
        let down_votes = window.iter().filter(|p| p.price < entry).count();
        let required_votes = self.config.required_votes(window.len());

        let buy_stop = entry * (1.0 - min_loss);
        let short_stop = entry * (1.0 + min_loss);
        let min_pred = preds.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_pred = preds.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

        debug!(
            entry = entry,
            end = end,
            required_gain_pct = required_gain_pct,
            min_loss = min_loss,
            up_votes = up_votes,
            down_votes = down_votes,
            required_votes = required_votes,
            min_pred = min_pred,
            max_pred = max_pred,
            buy_stop = buy_stop,
            short_stop = short_stop,
            "Forecast: evaluating {} points",
            preds.len()
        );

        let enforce = self.config.enforce_path_stop;
        let gates = Gates {
            buy_move: end > entry * (1.0 + required_gain_pct),
            buy_votes: up_votes >= required_votes,
            buy_path: !enforce || min_pred >= buy_stop,
            short_move: end < entry * (1.0 - required_gain_pct),
            short_votes: down_votes >= required_votes,
            short_path: !enforce || max_pred <= short_stop,
        };

        let (action, reason) = if gates.buy() {
            (Action::Buy, "Forecast up + votes + path ok")
        } else if gates.short() {
            (Action::Short, "Forecast down + votes + path ok")
        } else {
            let reason = gates.hold_reason();
            info!(
                entry = entry,
                end = end,
                reason = %reason,
                "Forecast: HOLD ({})",
                reason
            );
            return Directive::hold_because(reason);
        };

        let target_pct = 2.0 * required_gain_pct;
        let levels = match StopLossTakeProfit::for_action(action, entry, min_loss, target_pct) {
            Some(levels) if levels.is_finite() => levels,
            _ => {
                warn!(min_loss = min_loss, "Forecast: non-finite {} levels", action);
                return Directive::hold_because(REASON_BAD_PRICE_DATA);
            }
        };
        let directive = levels
            .rounded(PRICE_DECIMALS)
            .into_directive(action)
            .with_reason(reason);

        info!(
            action = %directive.action,
            entry = ?directive.entry,
            stop_loss = ?directive.stop_loss,
            take_profit = ?directive.take_profit,
            "Forecast: {}",
            directive.action
        );
        directive
    }
}

impl fmt::Display for ForecastStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        write!(
            f,
            "ForecastStrategy(fee_pct={}, min_gain={}, min_loss={}, label_width={}, \
             min_abs_gain_pct={}, vote_window={}, vote_strict={}, enforce_path_stop={})",
            c.fee_pct,
            c.min_gain(),
            c.min_loss(),
            c.label_width,
            c.min_abs_gain_pct,
            c.vote_window,
            c.vote_strict,
            c.enforce_path_stop
        )
    }
}

impl Strategy for ForecastStrategy {
    fn name(&self) -> &str {
        "ForecastStrategy"
    }

    fn evaluate_input(&self, input: &StrategyInput<'_>) -> Directive {
        self.evaluate(input.historical, input.forecast)
    }

    fn justification_text(&self, signal: &Directive) -> String {
        let pct = self.config.required_gain_pct() * 100.0;
        let consensus = if self.config.vote_strict {
            "unanimous"
        } else {
            "near-unanimous"
        };
        match signal.action {
            Action::Buy => format!(
                "Forecast ends more than {:.2}% above entry with {} upward votes.",
                pct, consensus
            ),
            Action::Short => format!(
                "Forecast ends more than {:.2}% below entry with {} downward votes.",
                pct, consensus
            ),
            Action::Hold => format!(
                "Forecast did not clear the {:.2}% move gate ({}).",
                pct,
                signal.reason.as_deref().unwrap_or("no_signal")
            ),
        }
    }
}
