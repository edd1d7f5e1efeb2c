//! Outbound notification channel for confirmed signals

pub mod telegram;

pub use telegram::{format_message, TelegramNotifier};

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::models::signal::ConfirmedSignal;
use crate::strategies::Strategy;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `signal` for `coin`, explained by each of `confirmations`.
    ///
    /// Only BUY/SHORT signals are delivered. Returns whether a message was sent.
    async fn send_signal(
        &self,
        coin: &str,
        signal: &ConfirmedSignal,
        confirmations: &[&dyn Strategy],
    ) -> Result<bool, NotifyError>;
}
