//! Progress Port
//!
//! Callback interface for observing batch reconciliation progress.

use serde::{Deserialize, Serialize};

/// Progress snapshot reported after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Trades processed so far.
    pub processed: usize,
    /// Trades in the batch.
    pub total: usize,
    /// Chunks completed so far.
    pub chunks_completed: usize,
}

impl BatchProgress {
    /// Completion percentage, capped at 100. An empty batch is complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64 * 100.0).min(100.0)
        }
    }

    /// Returns true once every trade has been processed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Receives progress reports from the batch runner.
pub trait ProgressReporter: Send + Sync {
    /// Called after each chunk.
    fn report(&self, progress: BatchProgress);
}

impl<F> ProgressReporter for F
where
    F: Fn(BatchProgress) + Send + Sync,
{
    fn report(&self, progress: BatchProgress) {
        self(progress);
    }
}

/// Progress reporter that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn report(&self, _progress: BatchProgress) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn percentage_is_capped() {
        let progress = BatchProgress {
            processed: 120,
            total: 100,
            chunks_completed: 3,
        };
        assert!((progress.percentage() - 100.0).abs() < f64::EPSILON);
        assert!(progress.is_complete());
    }

    #[test]
    fn percentage_of_partial_batch() {
        let progress = BatchProgress {
            processed: 50,
            total: 120,
            chunks_completed: 1,
        };
        assert!((progress.percentage() - 41.666).abs() < 0.01);
        assert!(!progress.is_complete());
    }

    #[test]
    fn empty_batch_is_complete() {
        let progress = BatchProgress {
            processed: 0,
            total: 0,
            chunks_completed: 0,
        };
        assert!((progress.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn closures_are_reporters() {
        let seen = Mutex::new(Vec::new());
        let reporter = |p: BatchProgress| seen.lock().unwrap().push(p.processed);
        reporter.report(BatchProgress {
            processed: 7,
            total: 10,
            chunks_completed: 1,
        });
        NoOpProgress.report(BatchProgress {
            processed: 1,
            total: 1,
            chunks_completed: 1,
        });
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }
}
