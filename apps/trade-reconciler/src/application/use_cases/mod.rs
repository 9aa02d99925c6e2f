//! Use Cases
//!
//! Application use cases that orchestrate domain logic.

mod reconcile_trades;

pub use reconcile_trades::{ReconcileTradesError, ReconcileTradesOutput, ReconcileTradesUseCase};
