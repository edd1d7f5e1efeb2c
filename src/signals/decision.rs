//! Stop-loss / take-profit level derivation and output rounding

use crate::models::signal::{Action, Directive};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Absolute price levels for a directional trade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLossTakeProfit {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl StopLossTakeProfit {
    /// Levels for a trade entered at `entry`.
    ///
    /// `stop_pct` is the adverse move that stops the trade out and `target_pct`
    /// the favourable move that takes profit, both as fractions of entry.
    /// Returns `None` for HOLD.
    pub fn for_action(action: Action, entry: f64, stop_pct: f64, target_pct: f64) -> Option<Self> {
        match action {
            Action::Buy => Some(Self {
                entry,
                stop_loss: entry * (1.0 - stop_pct),
                take_profit: entry * (1.0 + target_pct),
            }),
            Action::Short => Some(Self {
                entry,
                stop_loss: entry * (1.0 + stop_pct),
                take_profit: entry * (1.0 - target_pct),
            }),
            Action::Hold => None,
        }
    }

    /// All three levels are plain finite prices
    pub fn is_finite(&self) -> bool {
        self.entry.is_finite() && self.stop_loss.is_finite() && self.take_profit.is_finite()
    }

    pub fn rounded(self, decimals: u32) -> Self {
        Self {
            entry: round_to(self.entry, decimals),
            stop_loss: round_to(self.stop_loss, decimals),
            take_profit: round_to(self.take_profit, decimals),
        }
    }

    pub fn into_directive(self, action: Action) -> Directive {
        Directive::trade(action, self.entry, self.stop_loss, self.take_profit)
    }
}
