//! Forecast/RSI signal confirmation engine.
//!
//! Two independent strategies evaluate a model forecast against recent prices;
//! only when both agree on BUY or SHORT does a confirmed signal go out.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;
