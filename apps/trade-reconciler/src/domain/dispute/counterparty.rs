//! Counterparty shown on a disputed invoice.

use super::DisputeType;
use crate::domain::shared::simple_additive_hash;
use crate::domain::trade::TradeRecord;

/// Wrong entities an invoice can be addressed to, selected by `hash mod 4`.
pub const WRONG_COUNTERPARTY_POOL: [&str; 4] = [
    "WRONG BANK LTD",
    "INCORRECT ENTITY",
    "MISMATCHED CORP",
    "WRONG ACCOUNT",
];

/// Counterparty printed on the invoice for `trade`.
///
/// Trades disputed as Wrong Counterparty or Account get a seeded wrong
/// entity; everything else keeps the captured counterparty.
#[must_use]
pub fn invoice_counterparty(
    trade: &TradeRecord,
    has_dispute: bool,
    dispute_types: &[DisputeType],
) -> String {
    if has_dispute && dispute_types.contains(&DisputeType::WrongCounterpartyOrAccount) {
        let hash = simple_additive_hash(trade.trade_id().as_str());
        let index = (hash % WRONG_COUNTERPARTY_POOL.len() as u64) as usize;
        return WRONG_COUNTERPARTY_POOL[index].to_string();
    }
    trade.counterparty().to_string()
}
