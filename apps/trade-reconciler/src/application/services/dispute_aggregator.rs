//! Dispute report.
//!
//! Turns a batch result map into the records the payment workflow consumes:
//! one record per disputed trade, with a routing department, a priority,
//! per-type descriptions, and a synthetic workflow status. Every derived
//! value is a pure function of `(trade id, dispute types, variance)` plus
//! the agent name, so reports are reproducible.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::dispute::{DisputeType, join_labels};
use crate::domain::reconciliation::{ReconciliationResult, ReconciliationStatus};
use crate::domain::shared::{Money, simple_additive_hash};

/// Departments disputes are routed to, indexed by `hash(tradeId) mod 8`.
pub const DEPARTMENTS: [&str; 8] = [
    "Equity Trading",
    "FX Trading",
    "Fixed Income",
    "Derivatives",
    "Custody Operations",
    "Settlement Operations",
    "Treasury",
    "Prime Brokerage",
];

/// Agent-name keywords checked in order before falling back to the hash.
const DEPARTMENT_KEYWORDS: &[(&[&str], &str)] = &[
    (&["custod"], "Custody Operations"),
    (&["fx", "forex", "currency"], "FX Trading"),
    (&["equit", "securities", "stock"], "Equity Trading"),
    (&["prime"], "Prime Brokerage"),
    (&["settle", "clearing"], "Settlement Operations"),
    (&["treasury"], "Treasury"),
    (&["bond", "fixed income"], "Fixed Income"),
    (&["deriv", "futures", "options"], "Derivatives"),
];

const HIGH_VARIANCE: Decimal = dec!(10000);
const MEDIUM_VARIANCE: Decimal = dec!(1000);

/// Dispute priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Large variance or a hard-evidence dispute type.
    High,
    /// Moderate variance or a rate-driven dispute type.
    Medium,
    /// Everything else.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Synthetic workflow state of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// Closed out with the agent.
    Resolved,
    /// Being investigated.
    #[serde(rename = "Under Review")]
    UnderReview,
    /// Raised with management.
    Escalated,
    /// Not yet picked up.
    Open,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => write!(f, "Resolved"),
            Self::UnderReview => write!(f, "Under Review"),
            Self::Escalated => write!(f, "Escalated"),
            Self::Open => write!(f, "Open"),
        }
    }
}

/// Route a dispute to a department.
///
/// Agent-name keywords win; otherwise the trade id picks a department.
#[must_use]
pub fn assign_department(trade_id: &str, agent: &str) -> &'static str {
    let agent = agent.to_lowercase();
    DEPARTMENT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| agent.contains(k)))
        .map_or_else(
            || {
                let index = usize::try_from(simple_additive_hash(trade_id) % 8).unwrap_or(0);
                DEPARTMENTS[index]
            },
            |(_, department)| *department,
        )
}

/// Types that make a dispute high priority regardless of variance.
const HIGH_PRIORITY_TYPES: [DisputeType; 3] = [
    DisputeType::DuplicateCharges,
    DisputeType::ServiceNotRendered,
    DisputeType::WrongRateCardApplied,
];

/// Types that make a dispute at least medium priority.
const MEDIUM_PRIORITY_TYPES: [DisputeType; 3] = [
    DisputeType::Overcharging,
    DisputeType::IncorrectTaxApplication,
    DisputeType::CurrencyConversionError,
];

/// Priority from variance magnitude and dispute types.
#[must_use]
pub fn assess_priority(variance: Decimal, dispute_types: &[DisputeType]) -> Priority {
    let magnitude = variance.abs();
    let any_of = |set: &[DisputeType]| dispute_types.iter().any(|t| set.contains(t));

    if magnitude > HIGH_VARIANCE || any_of(HIGH_PRIORITY_TYPES.as_slice()) {
        Priority::High
    } else if magnitude > MEDIUM_VARIANCE || any_of(MEDIUM_PRIORITY_TYPES.as_slice()) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Description of one dispute type for a given variance.
#[must_use]
pub fn describe_dispute(dispute: DisputeType, variance: Decimal) -> String {
    let v = Money::new(variance);
    match dispute {
        DisputeType::Overcharging => format!("Fees billed {v} above the agreed schedule"),
        DisputeType::DuplicateCharges => {
            format!("Charge appears to be billed twice; {v} duplicated")
        }
        DisputeType::MissingTrades => {
            format!("Invoice includes {v} for trades missing from the uploaded dataset")
        }
        DisputeType::WrongCounterpartyOrAccount => {
            format!("Invoice addressed to the wrong counterparty or account; {v} at stake")
        }
        DisputeType::IncorrectTaxApplication => {
            format!("Tax applied incorrectly, creating a {v} variance")
        }
        DisputeType::ServiceNotRendered => {
            format!("Billed {v} for services that were not rendered")
        }
        DisputeType::FailChargesDisputed => format!("Fail charges of {v} disputed by the desk"),
        DisputeType::CurrencyConversionError => {
            format!("Currency conversion error produced a {v} variance")
        }
        DisputeType::WrongRateCardApplied => {
            format!("Wrong rate card applied; {v} over the contracted rates")
        }
        DisputeType::IncorrectBillingPeriod => {
            format!("Charges of {v} attributed to the wrong billing period")
        }
    }
}

/// Workflow status from `hash(labels joined by ", ") mod 10`.
#[must_use]
pub fn workflow_status(dispute_types: &[DisputeType]) -> WorkflowStatus {
    match simple_additive_hash(&join_labels(dispute_types)) % 10 {
        0 | 1 => WorkflowStatus::Resolved,
        2..=4 => WorkflowStatus::UnderReview,
        5 | 6 => WorkflowStatus::Escalated,
        _ => WorkflowStatus::Open,
    }
}

/// One disputed trade as presented to the payment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeRecord {
    /// Disputed trade.
    pub trade_id: String,
    /// Agent that issued the invoice.
    pub agent: String,
    /// Department the dispute is routed to.
    pub department: String,
    /// Dispute types in classification order.
    pub dispute_types: Vec<DisputeType>,
    /// One description per dispute type.
    pub descriptions: Vec<String>,
    /// Invoiced total minus expected total.
    pub variance: Decimal,
    /// Review priority.
    pub priority: Priority,
    /// Synthetic workflow state.
    pub workflow_status: WorkflowStatus,
    /// Reconciliation status of the trade.
    pub reconciliation_status: ReconciliationStatus,
}

impl DisputeRecord {
    /// Derive the record for a disputed result. Returns `None` when the result
    /// carries no dispute.
    #[must_use]
    pub fn from_result(result: &ReconciliationResult) -> Option<Self> {
        if !result.has_dispute {
            return None;
        }

        let variance = result.variance();
        let agent = result.expected_values.counterparty.clone();
        Some(Self {
            trade_id: result.trade_id.clone(),
            department: assign_department(&result.trade_id, &agent).to_string(),
            agent,
            descriptions: result
                .dispute_types
                .iter()
                .map(|t| describe_dispute(*t, variance))
                .collect(),
            dispute_types: result.dispute_types.clone(),
            variance,
            priority: assess_priority(variance, &result.dispute_types),
            workflow_status: workflow_status(&result.dispute_types),
            reconciliation_status: result.overall_status,
        })
    }
}

/// Counts over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeSummary {
    /// Trades in the batch.
    pub total_trades: usize,
    /// Trades carrying a dispute.
    pub disputed_trades: usize,
    /// Trades that reconciled cleanly.
    pub reconciled: usize,
    /// Trades that matched with discrepancies.
    pub matched: usize,
    /// Trades that did not match.
    pub mismatch: usize,
    /// Occurrences per dispute type label.
    pub by_dispute_type: BTreeMap<String, usize>,
    /// Disputes per priority.
    pub by_priority: BTreeMap<String, usize>,
    /// Disputes per workflow status.
    pub by_workflow_status: BTreeMap<String, usize>,
    /// Sum of absolute variances over disputed trades.
    pub total_absolute_variance: Decimal,
}

/// Dispute report for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeReport {
    /// Batch-wide counts.
    pub summary: DisputeSummary,
    /// Disputed trades, sorted by trade id.
    pub disputes: Vec<DisputeRecord>,
}

/// Build the dispute report for a batch result map.
#[must_use]
pub fn build_dispute_report(results: &HashMap<String, ReconciliationResult>) -> DisputeReport {
    let mut summary = DisputeSummary {
        total_trades: results.len(),
        ..Default::default()
    };
    let mut disputes = Vec::new();

    for result in results.values() {
        match result.overall_status {
            ReconciliationStatus::Reconciled => summary.reconciled += 1,
            ReconciliationStatus::Matched => summary.matched += 1,
            ReconciliationStatus::Mismatch => summary.mismatch += 1,
        }

        let Some(record) = DisputeRecord::from_result(result) else {
            continue;
        };

        summary.disputed_trades += 1;
        summary.total_absolute_variance = summary
            .total_absolute_variance
            .saturating_add(record.variance.abs());
        for dispute in &record.dispute_types {
            *summary
                .by_dispute_type
                .entry(dispute.label().to_string())
                .or_default() += 1;
        }
        *summary
            .by_priority
            .entry(record.priority.to_string())
            .or_default() += 1;
        *summary
            .by_workflow_status
            .entry(record.workflow_status.to_string())
            .or_default() += 1;
        disputes.push(record);
    }

    disputes.sort_by(|a, b| a.trade_id.cmp(&b.trade_id));

    DisputeReport { summary, disputes }
}
