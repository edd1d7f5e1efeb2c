//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod prices;
pub mod signal;

pub use indicators::RsiIndicator;
pub use prices::{ClosePoint, CloseSeries, PricePoint, PriceSeries};
pub use signal::{Action, ConfirmedSignal, Directive, Provenance};
