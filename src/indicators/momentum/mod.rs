pub mod rsi;

pub use rsi::{calculate_rsi, calculate_rsi_default, rsi_series, DEFAULT_RSI_PERIOD};
