//! Two-strategy agreement rule producing the final signal

use tracing::debug;

use crate::models::signal::{Action, ConfirmedSignal, Directive, Provenance};
use crate::strategies::rsi_momentum::CONFIRMATION_TAG;

/// Merges a primary directive with a confirming one.
///
/// Only an exact BUY/BUY or SHORT/SHORT agreement produces an actionable
/// signal; anything else reconciles to an unconfirmed HOLD.
#[derive(Debug, Clone)]
pub struct SignalReconciler {
    confirmed_by: String,
}

impl SignalReconciler {
    pub fn new(confirmed_by: impl Into<String>) -> Self {
        Self {
            confirmed_by: confirmed_by.into(),
        }
    }

    pub fn confirmed_by(&self) -> &str {
        &self.confirmed_by
    }

    pub fn reconcile(&self, primary: &Directive, confirmation: &Directive) -> ConfirmedSignal {
        if !agreed_action(primary.action, confirmation.action).is_actionable() {
            debug!(
                primary = %primary.action,
                confirmation = %confirmation.action,
                "Reconcile: no agreement, holding"
            );
            return ConfirmedSignal::unconfirmed();
        }

        ConfirmedSignal {
            action: primary.action,
            entry: primary.entry,
            stop_loss: primary.stop_loss,
            take_profit: primary.take_profit,
            indicator_value: confirmation.indicator_value,
            reason: primary.reason.clone(),
            confirmed_by: Some(self.confirmed_by.clone()),
            source: Provenance::Confirmed,
        }
    }
}

impl Default for SignalReconciler {
    fn default() -> Self {
        Self::new(CONFIRMATION_TAG)
    }
}

/// Action the reconciler would produce for a pair of actions
pub fn agreed_action(primary: Action, confirmation: Action) -> Action {
    if primary.is_actionable() && primary == confirmation {
        primary
    } else {
        Action::Hold
    }
}
