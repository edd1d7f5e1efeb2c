//! RSI (Relative Strength Index) indicator

use crate::indicators::error::IndicatorError;
use crate::models::indicators::RsiIndicator;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate the RSI series with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = smoothed gain / smoothed loss, smoothing factor 1/period
///
/// The first close has no predecessor and contributes a zero gain and loss.
/// Entries before `period` observations are `None`. A window with no losses
/// reads 100.
pub fn rsi_series(closes: &[f64], period: u32) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if let Some((index, &value)) = closes.iter().enumerate().find(|(_, c)| !c.is_finite()) {
        return Err(IndicatorError::NonFiniteInput { index, value });
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    let mut series = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let (gain, loss) = if i == 0 {
            (0.0, 0.0)
        } else {
            let change = closes[i] - closes[i - 1];
            (change.max(0.0), (-change).max(0.0))
        };

        if i == 0 {
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain = (1.0 - alpha) * avg_gain + alpha * gain;
            avg_loss = (1.0 - alpha) * avg_loss + alpha * loss;
        }

        if i + 1 < period as usize {
            series.push(None);
            continue;
        }

        let value = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        };
        series.push(Some(value));
    }

    Ok(series)
}

/// Calculate the latest RSI value, `None` until the warm-up is complete
pub fn calculate_rsi(closes: &[f64], period: u32) -> Result<Option<RsiIndicator>, IndicatorError> {
    let series = rsi_series(closes, period)?;
    Ok(series.last().copied().flatten().map(|value| RsiIndicator {
        value,
        period: Some(period),
    }))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Result<Option<RsiIndicator>, IndicatorError> {
    calculate_rsi(closes, DEFAULT_RSI_PERIOD)
}
