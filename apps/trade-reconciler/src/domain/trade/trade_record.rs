//! Trade record variants.

use rust_decimal::Decimal;
use serde::Serialize;

use super::InstrumentClass;
use crate::domain::shared::TradeId;

/// A captured cash equity trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityTrade {
    /// Trade identifier.
    pub trade_id: TradeId,
    /// Executing counterparty.
    pub counterparty: String,
    /// Billing currency.
    pub currency: Option<String>,
    /// Commission charged on the trade.
    pub commission: Decimal,
    /// Taxes charged on the trade.
    pub taxes: Decimal,
    /// All-in cost reported by the agent, if captured.
    pub total_cost: Option<Decimal>,
}

/// A captured FX trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FxTrade {
    /// Trade identifier.
    pub trade_id: TradeId,
    /// Executing counterparty.
    pub counterparty: String,
    /// Billing currency.
    pub currency: Option<String>,
    /// Base currency of the pair.
    pub base_currency: Option<String>,
    /// Commission amount.
    pub commission_amount: Decimal,
    /// Custody fee.
    pub custody_fee: Decimal,
    /// Settlement cost.
    pub settlement_cost: Decimal,
    /// Brokerage fee.
    pub brokerage_fee: Decimal,
}

/// A captured trade, discriminated by instrument class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dataSource", rename_all = "lowercase")]
pub enum TradeRecord {
    /// Equity trade.
    Equity(EquityTrade),
    /// FX trade.
    Fx(FxTrade),
}

impl TradeRecord {
    /// Trade identifier.
    #[must_use]
    pub const fn trade_id(&self) -> &TradeId {
        match self {
            Self::Equity(t) => &t.trade_id,
            Self::Fx(t) => &t.trade_id,
        }
    }

    /// Counterparty name (empty when not captured).
    #[must_use]
    pub fn counterparty(&self) -> &str {
        match self {
            Self::Equity(t) => &t.counterparty,
            Self::Fx(t) => &t.counterparty,
        }
    }

    /// Billing currency, if captured.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        match self {
            Self::Equity(t) => t.currency.as_deref(),
            Self::Fx(t) => t.currency.as_deref(),
        }
    }

    /// Instrument class of this trade.
    #[must_use]
    pub const fn instrument_class(&self) -> InstrumentClass {
        match self {
            Self::Equity(_) => InstrumentClass::Equity,
            Self::Fx(_) => InstrumentClass::Fx,
        }
    }

    /// Total amount billed for the trade.
    ///
    /// Equity uses the captured total cost when present and non-zero,
    /// otherwise commission plus taxes. FX sums its four fee columns.
    /// Sums saturate at the `Decimal` range.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        match self {
            Self::Equity(t) => t
                .total_cost
                .filter(|cost| !cost.is_zero())
                .unwrap_or_else(|| t.commission.saturating_add(t.taxes)),
            Self::Fx(t) => t
                .commission_amount
                .saturating_add(t.brokerage_fee)
                .saturating_add(t.custody_fee)
                .saturating_add(t.settlement_cost),
        }
    }
}

/// Total amount billed for a trade. See [`TradeRecord::total_amount`].
#[must_use]
pub fn calculate_total_amount(trade: &TradeRecord) -> Decimal {
    trade.total_amount()
}

impl From<EquityTrade> for TradeRecord {
    fn from(trade: EquityTrade) -> Self {
        Self::Equity(trade)
    }
}

impl From<FxTrade> for TradeRecord {
    fn from(trade: FxTrade) -> Self {
        Self::Fx(trade)
    }
}
