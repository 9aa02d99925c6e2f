//! In-memory result sink.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{ResultSinkError, ResultSinkPort};
use crate::domain::reconciliation::ReconciliationResult;

/// In-memory implementation of `ResultSinkPort`.
///
/// Holds the most recently stored result set. Every store replaces the whole
/// set, so a re-run never leaves stale entries behind.
#[derive(Debug, Default)]
pub struct InMemoryResultSink {
    results: RwLock<HashMap<String, ReconciliationResult>>,
}

impl InMemoryResultSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the sink holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored result for `trade_id`.
    #[must_use]
    pub fn get(&self, trade_id: &str) -> Option<ReconciliationResult> {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(trade_id)
            .cloned()
    }

    /// Copy of the stored result set.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, ReconciliationResult> {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ResultSinkPort for InMemoryResultSink {
    async fn store_results(
        &self,
        results: &HashMap<String, ReconciliationResult>,
    ) -> Result<(), ResultSinkError> {
        let mut stored = self
            .results
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        stored.clone_from(results);
        Ok(())
    }
}
