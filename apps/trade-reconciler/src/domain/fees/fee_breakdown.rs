//! Fee breakdown value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five billable fee columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeField {
    /// Commission.
    Commission,
    /// Taxes.
    Taxes,
    /// Custody fee.
    CustodyFee,
    /// Settlement cost.
    SettlementCost,
    /// Brokerage fee.
    BrokerageFee,
}

impl FeeField {
    /// All fee fields in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Commission,
        Self::Taxes,
        Self::CustodyFee,
        Self::SettlementCost,
        Self::BrokerageFee,
    ];

    /// Human-readable label used in discrepancy messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Commission => "Commission",
            Self::Taxes => "Tax",
            Self::CustodyFee => "Custody fee",
            Self::SettlementCost => "Settlement cost",
            Self::BrokerageFee => "Brokerage fee",
        }
    }
}

impl fmt::Display for FeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fee breakdown for one trade.
///
/// Fields that do not apply to the trade's instrument class stay zero.
/// Arithmetic saturates at the `Decimal` range instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    /// Commission.
    pub commission: Decimal,
    /// Taxes.
    pub taxes: Decimal,
    /// Custody fee.
    pub custody_fee: Decimal,
    /// Settlement cost.
    pub settlement_cost: Decimal,
    /// Brokerage fee.
    pub brokerage_fee: Decimal,
}

impl FeeBreakdown {
    /// Read a single fee column.
    #[must_use]
    pub const fn get(&self, field: FeeField) -> Decimal {
        match field {
            FeeField::Commission => self.commission,
            FeeField::Taxes => self.taxes,
            FeeField::CustodyFee => self.custody_fee,
            FeeField::SettlementCost => self.settlement_cost,
            FeeField::BrokerageFee => self.brokerage_fee,
        }
    }

    /// Return a copy with one fee column replaced.
    #[must_use]
    pub const fn with(mut self, field: FeeField, value: Decimal) -> Self {
        match field {
            FeeField::Commission => self.commission = value,
            FeeField::Taxes => self.taxes = value,
            FeeField::CustodyFee => self.custody_fee = value,
            FeeField::SettlementCost => self.settlement_cost = value,
            FeeField::BrokerageFee => self.brokerage_fee = value,
        }
        self
    }

    /// Multiply a column by `factor` if it is non-zero. Zero stays zero.
    #[must_use]
    pub fn scale_if_set(self, field: FeeField, factor: Decimal) -> Self {
        let current = self.get(field);
        if current.is_zero() {
            self
        } else {
            self.with(field, current.saturating_mul(factor))
        }
    }

    /// Add `amount` to a column unconditionally.
    #[must_use]
    pub fn add_to(self, field: FeeField, amount: Decimal) -> Self {
        self.with(field, self.get(field).saturating_add(amount))
    }

    /// Sum of all five columns.
    #[must_use]
    pub fn total(&self) -> Decimal {
        FeeField::ALL
            .iter()
            .fold(Decimal::ZERO, |sum, field| sum.saturating_add(self.get(*field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> FeeBreakdown {
        FeeBreakdown {
            commission: dec!(100),
            taxes: dec!(0),
            custody_fee: dec!(20),
            settlement_cost: dec!(10),
            brokerage_fee: dec!(5),
        }
    }

    #[test]
    fn total_sums_all_columns() {
        assert_eq!(sample().total(), dec!(135));
        assert_eq!(FeeBreakdown::default().total(), Decimal::ZERO);
    }

    #[test]
    fn scale_skips_zero_columns() {
        let fees = sample()
            .scale_if_set(FeeField::Commission, dec!(1.5))
            .scale_if_set(FeeField::Taxes, dec!(1.5));
        assert_eq!(fees.commission, dec!(150));
        assert_eq!(fees.taxes, Decimal::ZERO);
    }

    #[test]
    fn add_to_applies_to_zero_columns() {
        let fees = sample().add_to(FeeField::Taxes, dec!(500));
        assert_eq!(fees.taxes, dec!(500));
    }

    #[test]
    fn with_and_get_agree_for_every_field() {
        for field in FeeField::ALL {
            let fees = FeeBreakdown::default().with(field, dec!(7));
            assert_eq!(fees.get(field), dec!(7));
            assert_eq!(fees.total(), dec!(7));
        }
    }

    #[test]
    fn arithmetic_saturates_at_decimal_range() {
        let huge = FeeBreakdown::default()
            .with(FeeField::Commission, Decimal::MAX)
            .with(FeeField::CustodyFee, Decimal::MAX);

        assert_eq!(huge.total(), Decimal::MAX);
        assert_eq!(
            huge.scale_if_set(FeeField::Commission, dec!(1.35)).commission,
            Decimal::MAX
        );
        assert_eq!(
            huge.add_to(FeeField::CustodyFee, dec!(750)).custody_fee,
            Decimal::MAX
        );

        let negative = FeeBreakdown::default().with(FeeField::Taxes, Decimal::MIN);
        assert_eq!(negative.add_to(FeeField::Taxes, dec!(-500)).taxes, Decimal::MIN);
    }

    #[test]
    fn fee_field_labels() {
        assert_eq!(FeeField::Taxes.to_string(), "Tax");
        assert_eq!(FeeField::CustodyFee.label(), "Custody fee");
    }
}
