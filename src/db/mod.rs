//! Persistence: the signal store interface and its Postgres backing.

pub mod postgres;
pub mod store;

pub use postgres::SignalDatabase;
pub use store::{SignalRecord, SignalStore};
