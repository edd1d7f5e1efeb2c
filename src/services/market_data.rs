//! Market data source interface: candle closes and the tracked-coin catalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SourceError;
use crate::models::prices::CloseSeries;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Candle closes for `coin` at `interval` in `[start, end)`, oldest first.
    /// Missing closes are passed through as `None`; cleaning is the consumer's job.
    async fn get_closes(
        &self,
        coin: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<CloseSeries, SourceError>;
}

/// Catalog of coins that batch runs should evaluate
#[async_trait]
pub trait CoinCatalog: Send + Sync {
    async fn tracked_coins(&self) -> Result<Vec<String>, SourceError>;
}

/// Fixed coin list, for configurations without a catalog table
pub struct StaticCoinCatalog {
    coins: Vec<String>,
}

impl StaticCoinCatalog {
    pub fn new(coins: Vec<String>) -> Self {
        Self { coins }
    }
}

#[async_trait]
impl CoinCatalog for StaticCoinCatalog {
    async fn tracked_coins(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.coins.clone())
    }
}
