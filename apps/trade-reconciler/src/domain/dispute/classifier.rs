//! Deterministic dispute classifier.
//!
//! Any change to the arithmetic below reclassifies historical trades, so
//! results computed before and after such a change are not comparable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DisputeType;
use crate::domain::shared::hash::{simple_additive_hash, utf16_len};
use crate::domain::shared::DEFAULT_TRADE_ID;

/// Number of hash buckets a trade can fall into.
const BATCH_MODULUS: u64 = 15;

/// Buckets that carry a dispute (2 of 15, ~13.3%).
const DISPUTED_POSITIONS: [u64; 2] = [3, 11];

/// Seeded dispute decision for one trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeClassification {
    /// Whether the trade's invoice carries a dispute.
    pub has_dispute: bool,
    /// Dispute types in application order (empty when undisputed).
    pub dispute_types: Vec<DisputeType>,
}

impl DisputeClassification {
    /// An undisputed classification.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            has_dispute: false,
            dispute_types: Vec::new(),
        }
    }

    /// Returns true if the classification includes `dispute`.
    #[must_use]
    pub fn contains(&self, dispute: DisputeType) -> bool {
        self.dispute_types.contains(&dispute)
    }

    /// Returns true if the trade is disputed with at least one type.
    #[must_use]
    pub fn is_disputed(&self) -> bool {
        self.has_dispute && !self.dispute_types.is_empty()
    }

    /// Dispute labels joined by `", "`.
    #[must_use]
    pub fn joined_labels(&self) -> String {
        join_labels(&self.dispute_types)
    }
}

/// Join dispute labels with `", "`.
#[must_use]
pub fn join_labels(types: &[DisputeType]) -> String {
    types
        .iter()
        .map(DisputeType::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classify a trade by its identifier.
///
/// An empty identifier is classified as the `DEFAULT` placeholder.
/// When two types are requested but both indices land on the same type, the
/// result silently carries one type.
#[must_use]
pub fn classify(trade_id: &str) -> DisputeClassification {
    let id = if trade_id.is_empty() {
        DEFAULT_TRADE_ID
    } else {
        trade_id
    };

    let hash = simple_additive_hash(id);
    let batch_position = hash % BATCH_MODULUS;
    if !DISPUTED_POSITIONS.contains(&batch_position) {
        return DisputeClassification::none();
    }

    let len = utf16_len(id);
    let requested = if hash % 3 == 0 { 2 } else { 1 };

    let first = DisputeType::from_index(hash * 7 + len * 13);
    let mut dispute_types = vec![first];

    if requested == 2 {
        let second = DisputeType::from_index(hash * 11 + len * 17);
        if second != first {
            dispute_types.push(second);
        }
    }

    debug!(
        trade_id = id,
        hash,
        batch_position,
        requested,
        dispute_types = %join_labels(&dispute_types),
        "Trade classified as disputed"
    );

    DisputeClassification {
        has_dispute: true,
        dispute_types,
    }
}
