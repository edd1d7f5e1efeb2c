//! Postgres operations for predictions, candle closes and strategy signals

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tokio_postgres::{Client, NoTls};
use tracing::debug;
use uuid::Uuid;

use crate::config;
use crate::db::store::{SignalRecord, SignalStore};
use crate::error::{SourceError, StoreError};
use crate::models::prices::{ClosePoint, CloseSeries, PricePoint, PriceSeries};
use crate::services::market_data::{CoinCatalog, MarketDataSource};
use crate::services::predictions::{PredictionPackage, PredictionSource};

pub struct SignalDatabase {
    client: Client,
}

impl SignalDatabase {
    /// Connect using the configured database URL
    pub async fn new() -> Result<Self, StoreError> {
        Self::connect(&config::get_database_url()).await
    }

    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        // Spawn connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self { client };

        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS strategy_signals (
                    id TEXT PRIMARY KEY,
                    coin TEXT NOT NULL,
                    model_name TEXT NOT NULL,
                    signal JSONB NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT now()
                )",
                &[],
            )
            .await?;

        Ok(())
    }

    /// The client, unless the background connection task has ended
    fn live_client(&self) -> Option<&Client> {
        (!self.client.is_closed()).then_some(&self.client)
    }
}

const CONNECTION_CLOSED: &str = "Postgres connection closed";

fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

#[async_trait]
impl PredictionSource for SignalDatabase {
    async fn latest_prediction(
        &self,
        coin: &str,
        interval: &str,
        model: &str,
    ) -> Result<PredictionPackage, SourceError> {
        let c = self
            .live_client()
            .ok_or_else(|| SourceError::Unavailable(CONNECTION_CLOSED.to_string()))?;

        let rows = c
            .query(
                "SELECT id::text, metadata_json::jsonb
                 FROM prediction_metadata
                 WHERE coin = $1 AND interval = $2 AND model_name = $3
                 ORDER BY created_at DESC
                 LIMIT 1",
                &[&coin, &interval, &model],
            )
            .await?;

        let Some(row) = rows.first() else {
            debug!(coin = %coin, interval = %interval, model = %model, "No prediction stored");
            return Ok(PredictionPackage::empty());
        };

        let prediction_id: String = row.try_get(0)?;
        let metadata: Option<Value> = row.try_get(1)?;
        let metadata = match metadata {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(SourceError::Malformed(format!(
                    "prediction {} metadata is not an object: {}",
                    prediction_id, other
                )))
            }
            None => Map::new(),
        };

        let rows = c
            .query(
                "SELECT prediction_time, price::float8, is_historical
                 FROM predicted_prices
                 WHERE id::text = $1
                 ORDER BY prediction_time ASC",
                &[&prediction_id],
            )
            .await?;

        let mut historical = Vec::new();
        let mut forecast = Vec::new();
        for row in rows {
            let timestamp: NaiveDateTime = row.try_get(0)?;
            // A missing price stays visible to the strategies as a bad value
            let price: Option<f64> = row.try_get(1)?;
            let is_historical: bool = row.try_get(2)?;

            let point = PricePoint::new(to_utc(timestamp), price.unwrap_or(f64::NAN));
            if is_historical {
                historical.push(point);
            } else {
                forecast.push(point);
            }
        }

        Ok(PredictionPackage {
            historical: PriceSeries::new(historical),
            forecast: PriceSeries::new(forecast),
            metadata,
        })
    }
}

#[async_trait]
impl MarketDataSource for SignalDatabase {
    async fn get_closes(
        &self,
        coin: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<CloseSeries, SourceError> {
        let c = self
            .live_client()
            .ok_or_else(|| SourceError::Unavailable(CONNECTION_CLOSED.to_string()))?;

        let start_naive = start.naive_utc();
        let end_naive = end.naive_utc();
        let rows = c
            .query(
                "SELECT open_time, close::float8
                 FROM klines
                 WHERE symbol = $1 AND interval = $2 AND open_time >= $3 AND open_time < $4
                 ORDER BY open_time ASC",
                &[&coin, &interval, &start_naive, &end_naive],
            )
            .await?;

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let open_time: NaiveDateTime = row.try_get(0)?;
            let close: Option<f64> = row.try_get(1)?;
            points.push(ClosePoint::new(to_utc(open_time), close));
        }

        Ok(CloseSeries::new(points))
    }
}

#[async_trait]
impl CoinCatalog for SignalDatabase {
    async fn tracked_coins(&self) -> Result<Vec<String>, SourceError> {
        let c = self
            .live_client()
            .ok_or_else(|| SourceError::Unavailable(CONNECTION_CLOSED.to_string()))?;

        let rows = c
            .query("SELECT symbol FROM coin_catalog WHERE tracked = true", &[])
            .await?;
        rows.iter()
            .map(|row| row.try_get::<_, String>(0).map_err(SourceError::from))
            .collect()
    }
}

#[async_trait]
impl SignalStore for SignalDatabase {
    async fn save_signal(
        &self,
        coin: &str,
        model_name: &str,
        signal: &SignalRecord,
    ) -> Result<(), StoreError> {
        let c = self
            .live_client()
            .ok_or_else(|| StoreError::Unavailable(CONNECTION_CLOSED.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let payload = serde_json::to_value(signal)?;
        let created_at = Utc::now().naive_utc();

        c.execute(
            "INSERT INTO strategy_signals (id, coin, model_name, signal, created_at)
             VALUES ($1, $2, $3, $4, $5)",
            &[&id, &coin, &model_name, &payload, &created_at],
        )
        .await?;

        Ok(())
    }
}
