//! Integration tests for the Telegram notifier against a mocked Bot API

use confluence::error::NotifyError;
use confluence::models::signal::{Action, ConfirmedSignal, Directive, Provenance};
use confluence::services::notifications::format_message;
use confluence::services::{Notifier, TelegramNotifier};
use confluence::strategies::{ForecastStrategy, RsiMomentumStrategy, Strategy};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn confirmed_buy() -> ConfirmedSignal {
    ConfirmedSignal {
        action: Action::Buy,
        entry: Some(100.0),
        stop_loss: Some(98.6),
        take_profit: Some(101.8),
        indicator_value: Some(71.3),
        reason: Some("Forecast up + votes + path ok".to_string()),
        confirmed_by: Some("RSI".to_string()),
        source: Provenance::Confirmed,
    }
}

fn notifier(server: &MockServer) -> TelegramNotifier {
    TelegramNotifier::with_client(server.uri(), reqwest::Client::new(), "test-token", "-100123")
}

#[tokio::test]
async fn sends_confirmed_signal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": "-100123",
            "parse_mode": "Markdown",
        })))
        .and(body_string_contains("BTCUSDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let rsi = RsiMomentumStrategy::default();
    let forecast = ForecastStrategy::default();
    let confirmations: [&dyn Strategy; 2] = [&forecast, &rsi];

    let sent = assert_ok!(
        notifier(&server)
            .send_signal("BTCUSDT", &confirmed_buy(), &confirmations)
            .await
    );
    assert!(sent);
}

#[tokio::test]
async fn hold_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sent = assert_ok!(
        notifier(&server)
            .send_signal("BTCUSDT", &ConfirmedSignal::unconfirmed(), &[])
            .await
    );
    assert!(!sent);
}

#[tokio::test]
async fn rejected_message_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = assert_err!(
        notifier(&server)
            .send_signal("BTCUSDT", &confirmed_buy(), &[])
            .await
    );
    match err {
        NotifyError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn message_lists_levels_and_justifications() {
    let rsi = RsiMomentumStrategy::default();
    let forecast = ForecastStrategy::default();
    let confirmations: [&dyn Strategy; 2] = [&forecast, &rsi];

    let message = format_message("ETHUSDT", &confirmed_buy(), &confirmations);

    assert!(message.contains("*ETHUSDT*"));
    assert!(message.contains("*Action:* `BUY`"));
    assert!(message.contains("*Entry:* `100`"));
    assert!(message.contains("*Stop Loss:* `98.6`"));
    assert!(message.contains("*Take Profit:* `101.8`"));
    assert!(message.contains("*Why:*"));
    assert!(message.contains("• RSI 71.30 is above threshold 55.00, indicating bullish momentum."));
    assert_eq!(message.matches("\n• ").count(), 2);
}

#[test]
fn message_marks_missing_levels() {
    let mut signal = confirmed_buy();
    signal.take_profit = None;
    let message = format_message("ETHUSDT", &signal, &[]);
    assert!(message.contains("*Take Profit:* `N/A`"));

    let directive = Directive::hold();
    assert_eq!(
        RsiMomentumStrategy::default().justification_text(&directive),
        "RSI not available."
    );
}
