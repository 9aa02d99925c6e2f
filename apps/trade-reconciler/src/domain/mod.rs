//! Domain Layer
//!
//! The innermost layer containing the billing reconciliation logic with zero
//! infrastructure dependencies. Every function here is pure: inputs are read,
//! fresh outputs are allocated, nothing is persisted.
//!
//! # Bounded Contexts
//!
//! - [`trade`]: Captured equity and FX trade records
//! - [`fees`]: Fee breakdowns and expected-fee derivation
//! - [`dispute`]: Seeded dispute classification and invoice mutation rules
//! - [`reconciliation`]: Expected vs invoiced comparison and status derivation

pub mod dispute;
pub mod fees;
pub mod reconciliation;
pub mod shared;
pub mod trade;
