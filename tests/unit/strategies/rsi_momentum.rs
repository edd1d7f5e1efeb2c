//! Unit tests for the RSI momentum strategy

use chrono::{TimeZone, Utc};
use confluence::indicators::momentum::calculate_rsi;
use confluence::models::prices::{ClosePoint, CloseSeries, PriceSeries};
use confluence::models::signal::{Action, Directive};
use confluence::strategies::rsi_momentum::{
    REASON_BAD_PRICE_DATA, REASON_INSUFFICIENT_DATA, REASON_NO_VALID_CLOSES, REASON_RSI_FAILURE,
    REASON_RSI_NOT_READY,
};
use confluence::strategies::{RsiMomentumConfig, RsiMomentumStrategy, Strategy, StrategyInput};

fn end() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn prices(values: &[f64]) -> PriceSeries {
    PriceSeries::from_prices(values, end())
}

fn closes(values: &[f64]) -> CloseSeries {
    CloseSeries::from_closes(values, end())
}

fn rising_closes() -> CloseSeries {
    closes(&(0..30).map(|i| 50.0 + i as f64).collect::<Vec<_>>())
}

fn falling_closes() -> CloseSeries {
    closes(&(0..30).map(|i| 80.0 - i as f64).collect::<Vec<_>>())
}

fn choppy_closes() -> CloseSeries {
    closes(
        &(0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect::<Vec<_>>(),
    )
}

/// Alternating +1.5 / -1.0 steps, settling the RSI near 60
fn mostly_rising_values() -> Vec<f64> {
    let mut values = vec![100.0];
    for i in 0..40 {
        let step = if i % 2 == 0 { 1.5 } else { -1.0 };
        values.push(values[values.len() - 1] + step);
    }
    values
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
}

#[test]
fn test_rsi_strategy_buy() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &rising_closes(),
    );

    assert_eq!(directive.action, Action::Buy);
    assert_eq!(directive.entry, Some(100.0));
    assert!(approx(directive.stop_loss, 99.0));
    assert!(approx(directive.take_profit, 102.0));
    assert_eq!(directive.indicator_value, Some(100.0));
}

#[test]
fn test_rsi_strategy_short() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[99.5, 98.0]),
        &falling_closes(),
    );

    assert_eq!(directive.action, Action::Short);
    assert!(approx(directive.stop_loss, 101.0));
    assert!(approx(directive.take_profit, 98.0));
    assert_eq!(directive.indicator_value, Some(0.0));
}

#[test]
fn test_rsi_strategy_hold_keeps_rsi() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &choppy_closes(),
    );

    assert_eq!(directive.action, Action::Hold);
    assert!(directive.entry.is_none());
    assert!(directive.stop_loss.is_none());
    let rsi = directive.indicator_value.expect("HOLD should carry the RSI");
    assert!(rsi > 40.0 && rsi < 60.0, "choppy RSI {}", rsi);
    assert_eq!((rsi * 100.0).round() / 100.0, rsi);
}

#[test]
fn test_rsi_strategy_bullish_rsi_but_flat_target_holds() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.2, 100.5]),
        &rising_closes(),
    );

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.indicator_value, Some(100.0));
}

#[test]
fn test_rsi_strategy_insufficient_data() {
    let strategy = RsiMomentumStrategy::default();

    let directive = strategy.evaluate(&prices(&[100.0]), &prices(&[101.0]), &rising_closes());
    assert_eq!(directive.reason.as_deref(), Some(REASON_INSUFFICIENT_DATA));

    let directive = strategy.evaluate(&prices(&[100.0]), &prices(&[101.0, 102.0]), &closes(&[]));
    assert_eq!(directive.reason.as_deref(), Some(REASON_INSUFFICIENT_DATA));
    assert!(directive.indicator_value.is_none());
}

#[test]
fn test_rsi_strategy_no_valid_closes() {
    let strategy = RsiMomentumStrategy::default();
    let junk = CloseSeries::new(vec![
        ClosePoint::new(end(), None),
        ClosePoint::new(end(), Some(f64::NAN)),
    ]);
    let directive = strategy.evaluate(&prices(&[100.0]), &prices(&[101.0, 102.0]), &junk);

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.reason.as_deref(), Some(REASON_NO_VALID_CLOSES));
}

#[test]
fn test_rsi_strategy_not_ready() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[101.0, 102.0]),
        &closes(&[1.0, 2.0, 3.0, 4.0, 5.0]),
    );

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.reason.as_deref(), Some(REASON_RSI_NOT_READY));
}

#[test]
fn test_rsi_strategy_indicator_failure_holds() {
    let strategy = RsiMomentumStrategy::new(RsiMomentumConfig {
        rsi_period: 0,
        ..RsiMomentumConfig::default()
    });
    let directive = strategy.evaluate(&prices(&[100.0]), &prices(&[101.0, 102.0]), &rising_closes());

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.reason.as_deref(), Some(REASON_RSI_FAILURE));
}

#[test]
fn test_rsi_strategy_bad_price_data() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[101.0, f64::NAN]),
        &rising_closes(),
    );

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.reason.as_deref(), Some(REASON_BAD_PRICE_DATA));
    assert_eq!(directive.indicator_value, Some(100.0));
}

#[test]
fn test_rsi_strategy_non_finite_levels_hold() {
    let strategy = RsiMomentumStrategy::new(RsiMomentumConfig {
        fee_pct: f64::NEG_INFINITY,
        ..RsiMomentumConfig::default()
    });
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &rising_closes(),
    );

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.reason.as_deref(), Some(REASON_BAD_PRICE_DATA));
    assert!(directive.stop_loss.is_none());
    assert_eq!(directive.indicator_value, Some(100.0));
}

#[test]
fn test_rsi_strategy_buy_with_mid_range_rsi() {
    let strategy = RsiMomentumStrategy::default();
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &closes(&mostly_rising_values()),
    );

    assert_eq!(directive.action, Action::Buy);
    let rsi = directive.indicator_value.unwrap();
    assert!(rsi > 55.0 && rsi < 70.0, "mid-range RSI {}", rsi);
}

#[test]
fn test_rsi_strategy_rsi_at_threshold_holds() {
    let values = mostly_rising_values();
    let rsi = calculate_rsi(&values, 14).unwrap().unwrap().value;

    let at = RsiMomentumStrategy::new(RsiMomentumConfig {
        rsi_threshold: rsi,
        ..RsiMomentumConfig::default()
    });
    let directive = at.evaluate(&prices(&[100.0]), &prices(&[100.5, 102.0]), &closes(&values));
    assert_eq!(directive.action, Action::Hold);
    assert!(directive.entry.is_none());

    let below = RsiMomentumStrategy::new(RsiMomentumConfig {
        rsi_threshold: rsi - 0.01,
        ..RsiMomentumConfig::default()
    });
    let directive = below.evaluate(&prices(&[100.0]), &prices(&[100.5, 102.0]), &closes(&values));
    assert_eq!(directive.action, Action::Buy);
}

#[test]
fn test_rsi_strategy_flat_closes_at_threshold_hold() {
    // Flat closes pin the RSI at 100, so a threshold of 100 is never exceeded
    let strategy = RsiMomentumStrategy::new(RsiMomentumConfig {
        rsi_threshold: 100.0,
        ..RsiMomentumConfig::default()
    });
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &closes(&[100.0; 30]),
    );

    assert_eq!(directive.action, Action::Hold);
    assert_eq!(directive.indicator_value, Some(100.0));
}

#[test]
fn test_rsi_strategy_drops_missing_closes() {
    let strategy = RsiMomentumStrategy::default();
    let mut points = rising_closes().points().to_vec();
    points.insert(10, ClosePoint::new(end(), None));
    let directive = strategy.evaluate(
        &prices(&[100.0]),
        &prices(&[100.5, 102.0]),
        &CloseSeries::new(points),
    );

    assert_eq!(directive.action, Action::Buy);
}

#[test]
fn test_rsi_strategy_evaluate_input_needs_closes() {
    let strategy = RsiMomentumStrategy::default();
    let historical = prices(&[100.0]);
    let forecast = prices(&[100.5, 102.0]);
    let closes = rising_closes();

    let without = strategy.evaluate_input(&StrategyInput::new(&historical, &forecast));
    assert_eq!(without.reason.as_deref(), Some(REASON_INSUFFICIENT_DATA));

    let with = strategy.evaluate_input(&StrategyInput::new(&historical, &forecast).with_closes(&closes));
    assert_eq!(with.action, Action::Buy);
}

#[test]
fn test_rsi_strategy_justification_text() {
    let strategy = RsiMomentumStrategy::default();

    let buy = Directive::trade(Action::Buy, 100.0, 99.0, 102.0).with_indicator(72.5);
    assert_eq!(
        strategy.justification_text(&buy),
        "RSI 72.50 is above threshold 55.00, indicating bullish momentum."
    );

    let short = Directive::trade(Action::Short, 100.0, 101.0, 98.0).with_indicator(30.0);
    assert_eq!(
        strategy.justification_text(&short),
        "RSI 30.00 is below 45.00, indicating bearish momentum."
    );

    let hold = Directive::hold().with_indicator(50.0);
    assert!(strategy
        .justification_text(&hold)
        .contains("momentum inconclusive"));

    assert_eq!(strategy.justification_text(&Directive::hold()), "RSI not available.");
}

#[test]
fn test_rsi_strategy_display() {
    let strategy = RsiMomentumStrategy::default();
    assert_eq!(strategy.name(), "RSIMomentumStrategy");
    assert_eq!(
        strategy.to_string(),
        "RSIMomentumStrategy(fee_pct=0.005, rsi_threshold=55)"
    );
}
