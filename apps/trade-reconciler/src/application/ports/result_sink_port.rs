//! Result Sink Port (Driven Port)
//!
//! Interface for handing reconciliation results to persistence or display.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::reconciliation::ReconciliationResult;

/// Result sink error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResultSinkError {
    /// The sink rejected the write.
    #[error("Result sink write failed: {message}")]
    WriteFailed {
        /// Error details.
        message: String,
    },
}

/// Port for storing a batch of results.
///
/// Each call carries a complete result set that replaces any previous one.
#[async_trait]
pub trait ResultSinkPort: Send + Sync {
    /// Store a complete result set keyed by trade id.
    async fn store_results(
        &self,
        results: &HashMap<String, ReconciliationResult>,
    ) -> Result<(), ResultSinkError>;
}

/// No-op result sink for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpResultSink;

#[async_trait]
impl ResultSinkPort for NoOpResultSink {
    async fn store_results(
        &self,
        _results: &HashMap<String, ReconciliationResult>,
    ) -> Result<(), ResultSinkError> {
        Ok(())
    }
}
