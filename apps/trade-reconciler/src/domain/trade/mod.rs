//! Trade Bounded Context
//!
//! Captured trades as they arrive from ingestion. Equity and FX trades carry
//! different fee fields, so the record is a tagged union keyed by the
//! `dataSource` discriminant. Fallback coalescing (e.g. FX commission from
//! the generic `commission` column) happens once at ingestion, never here.

mod instrument_class;
mod trade_record;

pub use instrument_class::InstrumentClass;
pub use trade_record::{EquityTrade, FxTrade, TradeRecord, calculate_total_amount};
