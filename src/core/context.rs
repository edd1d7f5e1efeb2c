//! Collaborators handed to the run driver

use std::sync::Arc;

use crate::db::store::SignalStore;
use crate::services::market_data::MarketDataSource;
use crate::services::notifications::Notifier;
use crate::services::predictions::PredictionSource;

/// Read access to predictions and candles, plus optional persistence and
/// notification. Missing store/notifier simply skips those steps.
#[derive(Clone)]
pub struct RunContext {
    pub predictions: Arc<dyn PredictionSource>,
    pub market_data: Arc<dyn MarketDataSource>,
    pub store: Option<Arc<dyn SignalStore>>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl RunContext {
    pub fn new(
        predictions: Arc<dyn PredictionSource>,
        market_data: Arc<dyn MarketDataSource>,
    ) -> Self {
        Self {
            predictions,
            market_data,
            store: None,
            notifier: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SignalStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}
