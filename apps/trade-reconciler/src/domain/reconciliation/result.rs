//! Reconciliation result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::dispute::DisputeType;
use crate::domain::fees::FeeBreakdown;

/// Overall outcome of comparing one trade against its invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Every check passed.
    Reconciled,
    /// Counterparty, total, and commission agree; something else does not.
    Matched,
    /// Key fields disagree, the trade is missing, or the trade is disputed.
    Mismatch,
}

impl ReconciliationStatus {
    /// Returns true if no follow-up is required.
    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled)
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reconciled => write!(f, "reconciled"),
            Self::Matched => write!(f, "matched"),
            Self::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Values derived from the captured trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedValues {
    /// Expected fee columns.
    #[serde(flatten)]
    pub fees: FeeBreakdown,
    /// Captured counterparty.
    pub counterparty: String,
    /// Sum of the expected fee columns.
    pub total_expected: Decimal,
}

/// Values charged by the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualValues {
    /// Invoiced fee columns.
    #[serde(flatten)]
    pub fees: FeeBreakdown,
    /// Invoiced counterparty.
    pub counterparty: String,
    /// Sum of the invoiced fee columns.
    pub total_actual: Decimal,
}

/// Outcome of reconciling one trade against its invoice.
///
/// Built once by the comparator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Trade the result belongs to.
    pub trade_id: String,
    /// Invoice and trade identifiers agree.
    pub trade_id_match: bool,
    /// Counterparties agree, ignoring case.
    pub counterparty_match: bool,
    /// Totals agree within tolerance.
    pub amount_match: bool,
    /// Commission agrees within tolerance.
    pub commission_match: bool,
    /// Taxes agree within tolerance.
    pub tax_match: bool,
    /// Custody fee agrees within tolerance.
    pub custody_fee_match: bool,
    /// Settlement cost agrees within tolerance.
    pub settlement_cost_match: bool,
    /// Brokerage fee agrees within tolerance.
    pub brokerage_fee_match: bool,
    /// Trade date agrees. Dates are not compared yet; always true.
    pub date_match: bool,
    /// Number of passing checks out of eight (the date stub is not counted).
    pub match_count: u8,
    /// Derived status.
    pub overall_status: ReconciliationStatus,
    /// Human-readable discrepancies, in check order.
    pub discrepancies: Vec<String>,
    /// Whether the trade carries a seeded dispute.
    pub has_dispute: bool,
    /// Seeded dispute types.
    pub dispute_types: Vec<DisputeType>,
    /// Values derived from the trade.
    pub expected_values: ExpectedValues,
    /// Values charged by the invoice.
    pub actual_values: ActualValues,
}

impl ReconciliationResult {
    /// Invoiced total minus expected total.
    #[must_use]
    pub fn variance(&self) -> Decimal {
        self.actual_values
            .total_actual
            .saturating_sub(self.expected_values.total_expected)
    }

    /// Returns true if the invoice referenced a trade missing from the dataset.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        !self.trade_id_match
            && self
                .discrepancies
                .iter()
                .any(|d| d == super::NOT_FOUND_DISCREPANCY)
    }
}
