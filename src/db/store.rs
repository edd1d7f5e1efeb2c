//! Signal store interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::signal::{Action, ConfirmedSignal, Directive};

/// What gets persisted: a single strategy's directive or the reconciled signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalRecord {
    Confirmed(ConfirmedSignal),
    Directive(Directive),
}

impl SignalRecord {
    pub fn action(&self) -> Action {
        match self {
            SignalRecord::Confirmed(signal) => signal.action,
            SignalRecord::Directive(directive) => directive.action,
        }
    }
}

impl From<Directive> for SignalRecord {
    fn from(directive: Directive) -> Self {
        SignalRecord::Directive(directive)
    }
}

impl From<ConfirmedSignal> for SignalRecord {
    fn from(signal: ConfirmedSignal) -> Self {
        SignalRecord::Confirmed(signal)
    }
}

#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Durably record `signal` for `coin` under `model_name`
    async fn save_signal(
        &self,
        coin: &str,
        model_name: &str,
        signal: &SignalRecord,
    ) -> Result<(), StoreError>;
}
