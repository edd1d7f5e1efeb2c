//! Environment-driven configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::strategies::{ForecastConfig, RsiMomentumConfig};

pub const DEFAULT_DB_NAME: &str = "crypto_predictions";

/// Deployment environment, `sandbox` unless `ENVIRONMENT` says otherwise
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

/// Postgres connection string.
///
/// `DATABASE_URL` wins; otherwise one is assembled from `DBHOST`, `DBUSER`,
/// `DBPASSWORD` and `DBNAME`.
pub fn get_database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    let host = env::var("DBHOST").unwrap_or_else(|_| "localhost".to_string());
    let user = env::var("DBUSER").unwrap_or_else(|_| "postgres".to_string());
    let dbname = env::var("DBNAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
    match env::var("DBPASSWORD") {
        Ok(password) => format!(
            "host={} user={} password={} dbname={}",
            host, user, password, dbname
        ),
        Err(_) => format!("host={} user={} dbname={}", host, user, dbname),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Telegram credentials, if both are set
pub fn get_telegram_config() -> Option<TelegramConfig> {
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").ok().filter(|t| !t.is_empty())?;
    let chat_id = env::var("TELEGRAM_CHANNEL_ID").ok().filter(|c| !c.is_empty())?;
    Some(TelegramConfig { bot_token, chat_id })
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Like `env_parse`, but `NaN` and infinities are treated as unset
fn env_parse_finite(key: &str) -> Option<f64> {
    let value: f64 = env_parse(key)?;
    if value.is_finite() {
        Some(value)
    } else {
        warn!(key = %key, value = value, "Ignoring non-finite {}", key);
        None
    }
}

/// Settings for one evaluation run across the two strategies
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Forecasting model whose predictions are evaluated
    pub model: String,
    pub interval: String,
    /// Days of candle history fetched for the RSI
    pub since_days: i64,
    pub forecast: ForecastConfig,
    pub rsi: RsiMomentumConfig,
    /// Pause after each delivered notification
    pub notify_cooldown: Duration,
    /// Coins evaluated at the same time in a batch
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let fee_pct = 0.0;
        Self {
            model: "GRU".to_string(),
            interval: "1h".to_string(),
            since_days: 21,
            forecast: ForecastConfig {
                fee_pct,
                extra_gain: 0.00001,
                extra_loss: 0.000015,
                ..ForecastConfig::default()
            },
            rsi: RsiMomentumConfig {
                fee_pct,
                rsi_threshold: 55.0,
                ..RsiMomentumConfig::default()
            },
            notify_cooldown: Duration::from_secs(2),
            concurrency: 4,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `MODEL_NAME`, `INTERVAL`, `SINCE_DAYS`, `FEE_PCT`,
    /// `RSI_THRESHOLD`, `NOTIFY_COOLDOWN_MS` and `WORKER_CONCURRENCY`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = env::var("MODEL_NAME") {
            config.model = model;
        }
        if let Ok(interval) = env::var("INTERVAL") {
            config.interval = interval;
        }
        if let Some(days) = env_parse("SINCE_DAYS") {
            config.since_days = days;
        }
        if let Some(fee_pct) = env_parse_finite("FEE_PCT") {
            config.forecast.fee_pct = fee_pct;
            config.rsi.fee_pct = fee_pct;
        }
        if let Some(threshold) = env_parse_finite("RSI_THRESHOLD") {
            config.rsi.rsi_threshold = threshold;
        }
        if let Some(ms) = env_parse("NOTIFY_COOLDOWN_MS") {
            config.notify_cooldown = Duration::from_millis(ms);
        }
        if let Some(concurrency) = env_parse::<usize>("WORKER_CONCURRENCY") {
            config.concurrency = concurrency.max(1);
        }

        config
    }
}
