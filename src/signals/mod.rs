//! Signal decision helpers and reconciliation.

pub mod decision;
pub mod reconcile;

pub use decision::*;
pub use reconcile::*;
