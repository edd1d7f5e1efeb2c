//! Typed errors for the collaborators around the decision engine

use thiserror::Error;

/// Reading predictions, closes or the coin catalog failed
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Persisting a signal record failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("failed to serialize signal: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Delivering a notification failed
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A single coin's run could not complete
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to fetch prediction for {coin}: {source}")]
    Predictions {
        coin: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to fetch closes for {coin}: {source}")]
    MarketData {
        coin: String,
        #[source]
        source: SourceError,
    },
}
