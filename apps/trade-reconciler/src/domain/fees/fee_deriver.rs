//! Expected fee derivation.

use super::FeeBreakdown;
use crate::domain::trade::TradeRecord;

/// Derive the fees that should have been billed for `trade`.
///
/// Equity trades bill commission and taxes only; FX trades bill commission,
/// custody, settlement, and brokerage but never taxes.
#[must_use]
pub fn derive_expected_costs(trade: &TradeRecord) -> FeeBreakdown {
    match trade {
        TradeRecord::Equity(t) => FeeBreakdown {
            commission: t.commission,
            taxes: t.taxes,
            ..FeeBreakdown::default()
        },
        TradeRecord::Fx(t) => FeeBreakdown {
            commission: t.commission_amount,
            custody_fee: t.custody_fee,
            settlement_cost: t.settlement_cost,
            brokerage_fee: t.brokerage_fee,
            ..FeeBreakdown::default()
        },
    }
}
