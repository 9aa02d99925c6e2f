//! Reconcile Trades Use Case
//!
//! Loads trades, reconciles them in chunks, stores the result set, and builds
//! the dispute report.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::application::ports::{
    ProgressReporter, ResultSinkError, ResultSinkPort, TradeSourceError, TradeSourcePort,
};
use crate::application::services::{
    BatchOutcome, BatchReconciler, DisputeReport, build_dispute_report,
};

/// Errors from a reconciliation run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReconcileTradesError {
    /// Trades could not be loaded.
    #[error(transparent)]
    Source(#[from] TradeSourceError),

    /// Results could not be stored.
    #[error(transparent)]
    Sink(#[from] ResultSinkError),
}

/// Output of a reconciliation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileTradesOutput {
    /// Batch outcome, including the full result map.
    pub outcome: BatchOutcome,
    /// Dispute report over the result map.
    pub report: DisputeReport,
}

/// Use case for reconciling a trade source end to end.
pub struct ReconcileTradesUseCase<S, R>
where
    S: TradeSourcePort,
    R: ResultSinkPort,
{
    source: Arc<S>,
    sink: Arc<R>,
    runner: BatchReconciler,
}

impl<S, R> ReconcileTradesUseCase<S, R>
where
    S: TradeSourcePort,
    R: ResultSinkPort,
{
    /// Create a new `ReconcileTradesUseCase`.
    pub const fn new(source: Arc<S>, sink: Arc<R>, runner: BatchReconciler) -> Self {
        Self {
            source,
            sink,
            runner,
        }
    }

    /// Run to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the sink rejects the
    /// result set.
    pub async fn execute(
        &self,
        progress: &dyn ProgressReporter,
    ) -> Result<ReconcileTradesOutput, ReconcileTradesError> {
        self.execute_until_cancelled(progress, &CancellationToken::new())
            .await
    }

    /// Run until done or cancelled. Partial results are still stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the sink rejects the
    /// result set.
    pub async fn execute_until_cancelled(
        &self,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<ReconcileTradesOutput, ReconcileTradesError> {
        // 1. Load trades
        let trades = self.source.load_trades().await.inspect_err(|e| {
            error!(error = %e, "Failed to load trades");
        })?;

        // 2. Reconcile in chunks
        let outcome = self
            .runner
            .run_until_cancelled(&trades, progress, cancel)
            .await;

        // 3. Store the result set
        self.sink
            .store_results(&outcome.results)
            .await
            .inspect_err(|e| error!(run_id = %outcome.run_id, error = %e, "Failed to store results"))?;

        // 4. Build the dispute report
        let report = build_dispute_report(&outcome.results);
        info!(
            run_id = %outcome.run_id,
            total_trades = report.summary.total_trades,
            disputed_trades = report.summary.disputed_trades,
            "Dispute report built"
        );

        Ok(ReconcileTradesOutput { outcome, report })
    }
}
