//! Application Ports (Driven)
//!
//! Ports define interfaces for the collaborators around the engine:
//! where trades come from, where results go, and who watches progress.

mod progress_port;
mod result_sink_port;
mod trade_source_port;

pub use progress_port::{BatchProgress, NoOpProgress, ProgressReporter};
pub use result_sink_port::{NoOpResultSink, ResultSinkError, ResultSinkPort};
pub use trade_source_port::{TradeSourceError, TradeSourcePort};
