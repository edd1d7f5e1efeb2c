//! Prediction source interface

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::models::prices::PriceSeries;

/// Latest model output for one coin: the historical prices it was fed, the
/// prices it forecast, and whatever metadata the model run recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionPackage {
    pub historical: PriceSeries,
    pub forecast: PriceSeries,
    pub metadata: Map<String, Value>,
}

impl PredictionPackage {
    pub fn new(historical: PriceSeries, forecast: PriceSeries) -> Self {
        Self {
            historical,
            forecast,
            metadata: Map::new(),
        }
    }

    /// No prediction stored for the requested key
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Latest prediction for `(coin, interval, model)`, or an empty package if none exists
    async fn latest_prediction(
        &self,
        coin: &str,
        interval: &str,
        model: &str,
    ) -> Result<PredictionPackage, SourceError>;
}
