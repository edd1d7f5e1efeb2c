//! Price series consumed by the strategies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped price, either observed or forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered-by-timestamp sequence of price points.
///
/// Two of these exist per evaluation: the historical series, whose last point is
/// the entry price, and the forecast series produced by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Build a series from bare prices spaced one hour apart, ending at `end`
    pub fn from_prices(prices: &[f64], end: DateTime<Utc>) -> Self {
        let count = prices.len() as i64;
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let offset = chrono::Duration::hours(count - 1 - i as i64);
                PricePoint::new(end - offset, price)
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The trailing `width` points, or the whole series if it is shorter
    pub fn tail(&self, width: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(width);
        &self.points[start..]
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

/// Close price of a market candle. `None` when the upstream value was missing
/// or could not be read as a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub timestamp: DateTime<Utc>,
    pub close: Option<f64>,
}

impl ClosePoint {
    pub fn new(timestamp: DateTime<Utc>, close: Option<f64>) -> Self {
        Self { timestamp, close }
    }
}

/// Candle closes ascending by time, sampled independently of the price series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloseSeries {
    points: Vec<ClosePoint>,
}

impl CloseSeries {
    pub fn new(points: Vec<ClosePoint>) -> Self {
        Self { points }
    }

    /// Build a series of valid closes spaced one hour apart, ending at `end`
    pub fn from_closes(closes: &[f64], end: DateTime<Utc>) -> Self {
        let count = closes.len() as i64;
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let offset = chrono::Duration::hours(count - 1 - i as i64);
                ClosePoint::new(end - offset, Some(close))
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ClosePoint] {
        &self.points
    }

    /// Closes with missing and non-finite values dropped, order preserved
    pub fn cleaned(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|p| p.close)
            .filter(|c| c.is_finite())
            .collect()
    }
}

impl From<Vec<ClosePoint>> for CloseSeries {
    fn from(points: Vec<ClosePoint>) -> Self {
        Self::new(points)
    }
}
