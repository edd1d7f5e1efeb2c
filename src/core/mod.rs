//! Run orchestration: single coin, batch, and scheduled batches

pub mod batch;
pub mod context;
pub mod runner;
pub mod scheduler;

pub use batch::*;
pub use context::*;
pub use runner::*;
pub use scheduler::*;
