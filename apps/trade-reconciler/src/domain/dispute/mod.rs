//! Dispute Bounded Context
//!
//! Seeded billing disputes. Whether a trade is disputed, and how, is a pure
//! function of its identifier; each dispute type then perturbs the invoiced
//! fees with a fixed arithmetic rule.
//!
//! # Key Concepts
//!
//! - **Classification**: `hash(tradeId) mod 15 ∈ {3, 11}` marks a dispute
//! - **Rules**: one pure `FeeBreakdown -> FeeBreakdown` function per type
//! - **Mutation**: the ordered fold of rules over the expected fees

mod classifier;
mod counterparty;
mod dispute_type;
mod rules;

pub use classifier::{DisputeClassification, classify, join_labels};
pub use counterparty::{WRONG_COUNTERPARTY_POOL, invoice_counterparty};
pub use dispute_type::{DisputeType, UnknownDisputeType};
pub use rules::{
    apply_classified_mutations, apply_dispute_labels, apply_dispute_mutations,
    apply_dispute_types, apply_fallback_rule,
};
