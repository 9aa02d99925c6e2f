//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `ingestion/`: trade sources (JSON files, in-memory collections)
//! - `persistence/`: result sinks

pub mod ingestion;
pub mod persistence;

pub use ingestion::{
    IngestError, InMemoryTradeSource, JsonFileTradeSource, RawTradeRecord, parse_trades_json,
};
pub use persistence::InMemoryResultSink;
