//! Telegram Bot API notifier

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::error::NotifyError;
use crate::models::signal::ConfirmedSignal;
use crate::services::notifications::Notifier;
use crate::strategies::Strategy;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

fn level(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Render a Markdown message for a signal
pub fn format_message(coin: &str, signal: &ConfirmedSignal, confirmations: &[&dyn Strategy]) -> String {
    let directive = signal.as_directive();
    let mut message = format!(
        "📈 *{}* strategy signal\n\n\
         🧠 *Action:* `{}`\n\
         💰 *Entry:* `{}`\n\
         📉 *Stop Loss:* `{}`\n\
         🎯 *Take Profit:* `{}`\n\n\
         📌 *Why:*",
        coin,
        signal.action,
        level(signal.entry),
        level(signal.stop_loss),
        level(signal.take_profit),
    );
    for strategy in confirmations {
        message.push_str("\n• ");
        message.push_str(&strategy.justification_text(&directive));
    }
    message
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_client(
            TELEGRAM_API_URL,
            reqwest::Client::new(),
            config.bot_token.clone(),
            config.chat_id.clone(),
        )
    }

    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.token
        );
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_signal(
        &self,
        coin: &str,
        signal: &ConfirmedSignal,
        confirmations: &[&dyn Strategy],
    ) -> Result<bool, NotifyError> {
        if !signal.action.is_actionable() {
            debug!(coin = %coin, action = %signal.action, "Telegram: not sending non-actionable signal");
            return Ok(false);
        }

        let message = format_message(coin, signal, confirmations);
        self.send_message(&message).await?;
        info!(coin = %coin, action = %signal.action, "Telegram: signal sent for {}", coin);
        Ok(true)
    }
}
