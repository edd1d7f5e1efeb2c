//! Strategy definitions that consume price series and emit directives.

pub mod forecast;
pub mod momentum;
pub mod rsi_momentum;

pub use forecast::{ForecastConfig, ForecastStrategy};
pub use momentum::{MomentumConfig, MomentumStrategy};
pub use rsi_momentum::{RsiMomentumConfig, RsiMomentumStrategy};

use crate::models::prices::{CloseSeries, PriceSeries};
use crate::models::signal::Directive;

/// Everything a strategy may read during one evaluation
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
    pub historical: &'a PriceSeries,
    pub forecast: &'a PriceSeries,
    pub closes: Option<&'a CloseSeries>,
}

impl<'a> StrategyInput<'a> {
    pub fn new(historical: &'a PriceSeries, forecast: &'a PriceSeries) -> Self {
        Self {
            historical,
            forecast,
            closes: None,
        }
    }

    pub fn with_closes(mut self, closes: &'a CloseSeries) -> Self {
        self.closes = Some(closes);
        self
    }
}

/// Something that turns price data into a directive and can explain it.
///
/// Implementations are pure: no I/O, no interior state, the same input always
/// yields the same directive.
pub trait Strategy: Send + Sync {
    /// Name used when persisting this strategy's directives
    fn name(&self) -> &str;

    fn evaluate_input(&self, input: &StrategyInput<'_>) -> Directive;

    /// One-sentence explanation of a directive for human readers
    fn justification_text(&self, _signal: &Directive) -> String {
        "No specific justification provided.".to_string()
    }
}
