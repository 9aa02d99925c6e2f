//! Reconciliation Bounded Context
//!
//! Compares the fees a trade should have been billed against the fees its
//! invoice charges, field by field, and derives an overall status.
//!
//! # Key Concepts
//!
//! - **Checks**: trade id, counterparty, five fee columns, and the total
//! - **Tolerance**: absolute, inclusive, 0.01 currency units by default
//! - **Disputes force mismatch**: a disputed trade never reconciles

mod comparator;
mod invoice;
mod result;

pub use comparator::{
    DEFAULT_TOLERANCE, NOT_FOUND_DISCREPANCY, ReconciliationComparator, TOTAL_CHECKS, reconcile,
    reconcile_trade,
};
pub use invoice::Invoice;
pub use result::{ActualValues, ExpectedValues, ReconciliationResult, ReconciliationStatus};
