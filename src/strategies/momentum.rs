//! Simple forecast momentum strategy: a 4-of-5 vote with no path check.

use serde::{Deserialize, Serialize};

use crate::models::prices::PriceSeries;
use crate::models::signal::{Action, Directive};
use crate::signals::decision::StopLossTakeProfit;
use crate::strategies::{Strategy, StrategyInput};

const PRICE_DECIMALS: u32 = 2;
const VOTE_WINDOW: usize = 5;
const REQUIRED_VOTES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub fee_pct: f64,
    pub extra_gain: f64,
    pub extra_loss: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            fee_pct: 0.002,
            extra_gain: 0.005,
            extra_loss: 0.01,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MomentumStrategy {
    config: MomentumConfig,
}

impl MomentumStrategy {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, historical: &PriceSeries, forecast: &PriceSeries) -> Directive {
        let Some(start) = historical.last().map(|p| p.price) else {
            return Directive::hold();
        };
        if forecast.len() < 2 || !start.is_finite() {
            return Directive::hold();
        }
        let Some(end) = forecast.last().map(|p| p.price) else {
            return Directive::hold();
        };

        let min_gain = 2.0 * self.config.fee_pct + self.config.extra_gain;
        let min_loss = 2.0 * self.config.fee_pct + self.config.extra_loss;
        let window = forecast.tail(VOTE_WINDOW);
        let up = window.iter().filter(|p| p.price > start).count();
        let down = window.iter().filter(|p| p.price < start).count();

        let action = if end > start * (1.0 + min_gain) && up >= REQUIRED_VOTES {
            Action::Buy
        } else if end < start * (1.0 - min_gain) && down >= REQUIRED_VOTES {
            Action::Short
        } else {
            Action::Hold
        };

        match StopLossTakeProfit::for_action(action, start, min_loss, 2.0 * min_gain) {
            Some(levels) if levels.is_finite() => {
                let rounded = levels.rounded(PRICE_DECIMALS);
                Directive::trade(action, start, rounded.stop_loss, rounded.take_profit)
            }
            _ => Directive::hold(),
        }
    }
}

impl Strategy for MomentumStrategy {
    fn name(&self) -> &str {
        "MomentumStrategy"
    }

    fn evaluate_input(&self, input: &StrategyInput<'_>) -> Directive {
        self.evaluate(input.historical, input.forecast)
    }
}
