//! Shared Domain Types
//!
//! Value objects and primitives shared across bounded contexts.

pub mod hash;
pub mod value_objects;

pub use hash::simple_additive_hash;
pub use value_objects::{DEFAULT_TRADE_ID, Money, TradeId};
