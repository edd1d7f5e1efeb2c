//! Collaborators the engine reads from and reports to.

pub mod market_data;
pub mod notifications;
pub mod predictions;

pub use market_data::{CoinCatalog, MarketDataSource, StaticCoinCatalog};
pub use notifications::{Notifier, TelegramNotifier};
pub use predictions::{PredictionPackage, PredictionSource};
