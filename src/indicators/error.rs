use thiserror::Error;

/// Failures while computing an indicator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid period {0}: must be at least 1")]
    InvalidPeriod(u32),

    #[error("non-finite input value {value} at index {index}")]
    NonFiniteInput { index: usize, value: f64 },
}
