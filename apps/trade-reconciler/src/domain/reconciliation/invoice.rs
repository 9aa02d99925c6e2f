//! Invoice reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::TradeId;
use crate::domain::trade::TradeRecord;

/// Invoice line as received from an agent.
///
/// Only `trade_id` participates in matching; amount and counterparty are
/// carried for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Trade the invoice bills for.
    #[serde(default)]
    pub trade_id: TradeId,
    /// Invoiced amount, if stated.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Invoiced counterparty, if stated.
    #[serde(default)]
    pub counterparty: Option<String>,
}

impl Invoice {
    /// Invoice reference carrying only a trade id.
    #[must_use]
    pub fn new(trade_id: impl Into<TradeId>) -> Self {
        Self {
            trade_id: trade_id.into(),
            amount: None,
            counterparty: None,
        }
    }

    /// Minimal invoice synthesized from a captured trade.
    #[must_use]
    pub fn for_trade(trade: &TradeRecord) -> Self {
        Self {
            trade_id: trade.trade_id().clone(),
            amount: Some(trade.total_amount()),
            counterparty: Some(trade.counterparty().to_string()),
        }
    }
}
