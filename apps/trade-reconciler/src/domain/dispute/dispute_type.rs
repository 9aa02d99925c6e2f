//! Dispute categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing dispute category.
///
/// Variant order is part of the classification contract: the classifier
/// indexes into [`DisputeType::ALL`] with hash arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisputeType {
    /// Fees billed above the agreed rates.
    #[serde(rename = "Overcharging")]
    Overcharging,
    /// The same charge billed twice.
    #[serde(rename = "Duplicate Charges")]
    DuplicateCharges,
    /// Charges for trades absent from the dataset.
    #[serde(rename = "Missing Trades")]
    MissingTrades,
    /// Invoice addressed to the wrong entity or account.
    #[serde(rename = "Wrong Counterparty or Account")]
    WrongCounterpartyOrAccount,
    /// Taxes applied incorrectly.
    #[serde(rename = "Incorrect Tax Application")]
    IncorrectTaxApplication,
    /// Charges for services that were not delivered.
    #[serde(rename = "Service Not Rendered")]
    ServiceNotRendered,
    /// Fail charges the desk disputes.
    #[serde(rename = "Fail Charges Disputed")]
    FailChargesDisputed,
    /// Fees converted at the wrong rate.
    #[serde(rename = "Currency Conversion Error")]
    CurrencyConversionError,
    /// Fees computed from the wrong rate card.
    #[serde(rename = "Wrong Rate Card Applied")]
    WrongRateCardApplied,
    /// Charges attributed to the wrong billing period.
    #[serde(rename = "Incorrect Billing Period")]
    IncorrectBillingPeriod,
}

impl DisputeType {
    /// All dispute types in classification order.
    pub const ALL: [Self; 10] = [
        Self::Overcharging,
        Self::DuplicateCharges,
        Self::MissingTrades,
        Self::WrongCounterpartyOrAccount,
        Self::IncorrectTaxApplication,
        Self::ServiceNotRendered,
        Self::FailChargesDisputed,
        Self::CurrencyConversionError,
        Self::WrongRateCardApplied,
        Self::IncorrectBillingPeriod,
    ];

    /// Select a dispute type by classification index (taken modulo 10).
    #[must_use]
    pub const fn from_index(index: u64) -> Self {
        Self::ALL[(index % Self::ALL.len() as u64) as usize]
    }

    /// Display label, as shown on invoices and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Overcharging => "Overcharging",
            Self::DuplicateCharges => "Duplicate Charges",
            Self::MissingTrades => "Missing Trades",
            Self::WrongCounterpartyOrAccount => "Wrong Counterparty or Account",
            Self::IncorrectTaxApplication => "Incorrect Tax Application",
            Self::ServiceNotRendered => "Service Not Rendered",
            Self::FailChargesDisputed => "Fail Charges Disputed",
            Self::CurrencyConversionError => "Currency Conversion Error",
            Self::WrongRateCardApplied => "Wrong Rate Card Applied",
            Self::IncorrectBillingPeriod => "Incorrect Billing Period",
        }
    }
}

impl fmt::Display for DisputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label that does not name a known dispute type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dispute type: {0}")]
pub struct UnknownDisputeType(pub String);

impl FromStr for DisputeType {
    type Err = UnknownDisputeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| UnknownDisputeType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_order_is_fixed() {
        assert_eq!(DisputeType::from_index(0), DisputeType::Overcharging);
        assert_eq!(DisputeType::from_index(3), DisputeType::WrongCounterpartyOrAccount);
        assert_eq!(DisputeType::from_index(9), DisputeType::IncorrectBillingPeriod);
        assert_eq!(DisputeType::from_index(14), DisputeType::IncorrectTaxApplication);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for dispute in DisputeType::ALL {
            assert_eq!(dispute.label().parse::<DisputeType>(), Ok(dispute));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Late Fees".parse::<DisputeType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown dispute type: Late Fees");
        assert!("overcharging".parse::<DisputeType>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&DisputeType::WrongRateCardApplied).unwrap();
        assert_eq!(json, "\"Wrong Rate Card Applied\"");
    }
}
