//! Chunked batch reconciliation.
//!
//! Reconciles every trade against a synthesized invoice, 50 trades at a time,
//! reporting progress after each chunk. Chunking exists so a host can observe
//! progress and abandon the run; it is not a concurrency boundary.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::ports::{BatchProgress, ProgressReporter};
use crate::domain::reconciliation::{Invoice, ReconciliationComparator, ReconciliationResult};
use crate::domain::trade::TradeRecord;

/// Trades reconciled per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Batch runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Trades per chunk (at least 1).
    pub chunk_size: usize,
    /// Yield to the scheduler between chunks.
    pub yield_between_chunks: bool,
    /// Reconcile the trades of a chunk on the rayon pool.
    pub parallel: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            yield_between_chunks: true,
            parallel: false,
        }
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Unique id of this run.
    pub run_id: String,
    /// Results keyed by trade id. Later duplicates overwrite earlier ones.
    pub results: HashMap<String, ReconciliationResult>,
    /// Final progress snapshot.
    pub progress: BatchProgress,
    /// False if the run was cancelled before every chunk ran.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs the comparator over a trade collection.
#[derive(Debug, Clone, Default)]
pub struct BatchReconciler {
    comparator: ReconciliationComparator,
    settings: BatchSettings,
}

impl BatchReconciler {
    /// Create a batch runner.
    #[must_use]
    pub fn new(comparator: ReconciliationComparator, settings: BatchSettings) -> Self {
        Self {
            comparator,
            settings: BatchSettings {
                chunk_size: settings.chunk_size.max(1),
                ..settings
            },
        }
    }

    /// Runner settings.
    #[must_use]
    pub const fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Reconcile every trade, running to completion.
    pub async fn run(
        &self,
        trades: &[TradeRecord],
        progress: &dyn ProgressReporter,
    ) -> BatchOutcome {
        self.run_until_cancelled(trades, progress, &CancellationToken::new())
            .await
    }

    /// Reconcile trades chunk by chunk until done or `cancel` fires.
    ///
    /// Cancellation is checked before each chunk; a chunk in flight always
    /// finishes. A cancelled run returns the partial result set.
    pub async fn run_until_cancelled(
        &self,
        trades: &[TradeRecord],
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> BatchOutcome {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let total = trades.len();
        let mut results = HashMap::with_capacity(total);
        let mut snapshot = BatchProgress {
            processed: 0,
            total,
            chunks_completed: 0,
        };
        let mut completed = true;

        info!(
            run_id = %run_id,
            total,
            chunk_size = self.settings.chunk_size,
            "Starting batch reconciliation"
        );

        if trades.is_empty() {
            progress.report(snapshot);
        }

        for chunk in trades.chunks(self.settings.chunk_size) {
            if cancel.is_cancelled() {
                warn!(
                    run_id = %run_id,
                    processed = snapshot.processed,
                    total,
                    "Batch reconciliation cancelled"
                );
                completed = false;
                break;
            }

            for (trade_id, result) in self.reconcile_chunk(chunk) {
                results.insert(trade_id, result);
            }

            snapshot.processed += chunk.len();
            snapshot.chunks_completed += 1;
            debug!(
                run_id = %run_id,
                processed = snapshot.processed,
                total,
                percentage = snapshot.percentage(),
                "Chunk reconciled"
            );
            progress.report(snapshot);

            if self.settings.yield_between_chunks {
                tokio::task::yield_now().await;
            }
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let disputed = results.values().filter(|r| r.has_dispute).count();

        info!(
            run_id = %run_id,
            results = results.len(),
            disputed,
            completed,
            duration_ms,
            "Batch reconciliation finished"
        );

        BatchOutcome {
            run_id,
            results,
            progress: snapshot,
            completed,
            completed_at: chrono::Utc::now().to_rfc3339(),
            duration_ms,
        }
    }

    /// Reconcile one chunk, preserving input order.
    fn reconcile_chunk(&self, chunk: &[TradeRecord]) -> Vec<(String, ReconciliationResult)> {
        let reconcile_one = |trade: &TradeRecord| {
            let invoice = Invoice::for_trade(trade);
            (
                trade.trade_id().to_string(),
                self.comparator.reconcile_trade(trade, &invoice),
            )
        };

        if self.settings.parallel {
            chunk.par_iter().map(reconcile_one).collect()
        } else {
            chunk.iter().map(reconcile_one).collect()
        }
    }
}
