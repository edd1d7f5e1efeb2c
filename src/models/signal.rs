//! Directive and confirmed-signal models emitted by the strategies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading action proposed by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Short,
    Hold,
}

impl Action {
    /// BUY or SHORT
    pub fn is_actionable(self) -> bool {
        !matches!(self, Action::Hold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Short => "SHORT",
            Action::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single strategy evaluation.
///
/// Price levels are only present on BUY/SHORT. HOLD carries a reason and, for
/// oscillator-based strategies, the indicator value that was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub take_profit: Option<f64>,
    #[serde(rename = "rsi", skip_serializing_if = "Option::is_none", default)]
    pub indicator_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl Directive {
    pub fn hold() -> Self {
        Self {
            action: Action::Hold,
            entry: None,
            stop_loss: None,
            take_profit: None,
            indicator_value: None,
            reason: None,
        }
    }

    pub fn hold_because(reason: impl Into<String>) -> Self {
        Self::hold().with_reason(reason)
    }

    pub fn trade(action: Action, entry: f64, stop_loss: f64, take_profit: f64) -> Self {
        Self {
            action,
            entry: Some(entry),
            stop_loss: Some(stop_loss),
            take_profit: Some(take_profit),
            indicator_value: None,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_indicator(mut self, value: f64) -> Self {
        self.indicator_value = Some(value);
        self
    }
}

impl Default for Directive {
    fn default() -> Self {
        Self::hold()
    }
}

/// Whether a final signal was confirmed by a second strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Confirmed,
    Unconfirmed,
}

/// Reconciled signal: a directive tagged with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedSignal {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub take_profit: Option<f64>,
    #[serde(rename = "rsi", skip_serializing_if = "Option::is_none", default)]
    pub indicator_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confirmed_by: Option<String>,
    pub source: Provenance,
}

impl ConfirmedSignal {
    /// The default aggregate: HOLD with no price levels
    pub fn unconfirmed() -> Self {
        Self {
            action: Action::Hold,
            entry: None,
            stop_loss: None,
            take_profit: None,
            indicator_value: None,
            reason: None,
            confirmed_by: None,
            source: Provenance::Unconfirmed,
        }
    }

    /// Confirmed BUY/SHORT, ready to be dispatched
    pub fn is_actionable(&self) -> bool {
        self.source == Provenance::Confirmed && self.action.is_actionable()
    }

    /// View of this signal as a plain directive, for justification rendering
    pub fn as_directive(&self) -> Directive {
        Directive {
            action: self.action,
            entry: self.entry,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            indicator_value: self.indicator_value,
            reason: self.reason.clone(),
        }
    }
}
