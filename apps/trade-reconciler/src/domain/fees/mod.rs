//! Fees Bounded Context
//!
//! The five-field fee breakdown shared by expected and invoiced views of a
//! trade, and the derivation of the expected (clean) breakdown.

mod fee_breakdown;
mod fee_deriver;

pub use fee_breakdown::{FeeBreakdown, FeeField};
pub use fee_deriver::derive_expected_costs;
