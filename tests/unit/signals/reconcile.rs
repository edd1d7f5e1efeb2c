//! Unit tests for two-strategy reconciliation

use confluence::models::signal::{Action, ConfirmedSignal, Directive, Provenance};
use confluence::signals::reconcile::{agreed_action, SignalReconciler};

fn directive(action: Action) -> Directive {
    match action {
        Action::Buy => Directive::trade(Action::Buy, 100.0, 98.6, 101.8).with_reason("up"),
        Action::Short => Directive::trade(Action::Short, 100.0, 101.4, 98.2).with_reason("down"),
        Action::Hold => Directive::hold_because("flat"),
    }
}

#[test]
fn test_agreement_matrix() {
    let actions = [Action::Buy, Action::Short, Action::Hold];
    let reconciler = SignalReconciler::default();

    let mut actionable = 0;
    for primary in actions {
        for confirmation in actions {
            let signal = reconciler.reconcile(&directive(primary), &directive(confirmation));
            let agreed = primary == confirmation && primary != Action::Hold;

            assert_eq!(agreed_action(primary, confirmation).is_actionable(), agreed);
            if agreed {
                actionable += 1;
                assert_eq!(signal.action, primary);
                assert_eq!(signal.source, Provenance::Confirmed);
            } else {
                assert_eq!(signal, ConfirmedSignal::unconfirmed());
            }
        }
    }
    assert_eq!(actionable, 2);
}

#[test]
fn test_confirmed_signal_takes_levels_from_primary() {
    let primary = directive(Action::Buy);
    let confirmation = Directive::trade(Action::Buy, 100.0, 99.0, 102.0).with_indicator(68.42);

    let signal = SignalReconciler::default().reconcile(&primary, &confirmation);

    assert_eq!(signal.action, Action::Buy);
    assert_eq!(signal.entry, Some(100.0));
    assert_eq!(signal.stop_loss, Some(98.6));
    assert_eq!(signal.take_profit, Some(101.8));
    assert_eq!(signal.reason.as_deref(), Some("up"));
    assert_eq!(signal.indicator_value, Some(68.42));
    assert_eq!(signal.confirmed_by.as_deref(), Some("RSI"));
    assert!(signal.is_actionable());
}

#[test]
fn test_unconfirmed_default() {
    let signal = ConfirmedSignal::unconfirmed();
    assert_eq!(signal.action, Action::Hold);
    assert_eq!(signal.source, Provenance::Unconfirmed);
    assert!(signal.entry.is_none());
    assert!(signal.confirmed_by.is_none());
    assert!(!signal.is_actionable());
}

#[test]
fn test_custom_confirmation_tag() {
    let reconciler = SignalReconciler::new("MACD");
    assert_eq!(reconciler.confirmed_by(), "MACD");

    let signal = reconciler.reconcile(&directive(Action::Short), &directive(Action::Short));
    assert_eq!(signal.confirmed_by.as_deref(), Some("MACD"));
}
