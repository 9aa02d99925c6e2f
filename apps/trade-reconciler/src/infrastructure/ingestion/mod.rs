//! Trade Ingestion Adapters
//!
//! Raw trade rows arrive with loosely typed fields. They are coerced into
//! [`TradeRecord`](crate::domain::trade::TradeRecord) values here, once, so the
//! engine never sees missing or malformed numerics.

mod raw_trade;
mod sources;

pub use raw_trade::{IngestError, RawTradeRecord, parse_trades_json};
pub use sources::{InMemoryTradeSource, JsonFileTradeSource};
