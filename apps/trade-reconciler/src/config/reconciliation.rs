//! Reconciliation configuration for batch runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::observability::default_true;
use crate::application::services::{BatchReconciler, BatchSettings, DEFAULT_CHUNK_SIZE};
use crate::domain::reconciliation::{DEFAULT_TOLERANCE, ReconciliationComparator};

/// Reconciliation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Maximum absolute difference for a numeric field to match.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Trades per batch chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Yield to the scheduler between chunks.
    #[serde(default = "default_true")]
    pub yield_between_chunks: bool,
    /// Reconcile the trades of a chunk in parallel.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            chunk_size: default_chunk_size(),
            yield_between_chunks: true,
            parallel: false,
        }
    }
}

impl ReconciliationConfig {
    /// Build the batch runner described by this configuration.
    #[must_use]
    pub fn batch_reconciler(&self) -> BatchReconciler {
        BatchReconciler::new(
            ReconciliationComparator::new(self.tolerance),
            BatchSettings {
                chunk_size: self.chunk_size,
                yield_between_chunks: self.yield_between_chunks,
                parallel: self.parallel,
            },
        )
    }
}

const fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
