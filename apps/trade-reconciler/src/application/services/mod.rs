//! Application Services
//!
//! Orchestration over the domain: chunked batch reconciliation and the
//! dispute report consumed by the payment workflow.

mod batch_runner;
mod dispute_aggregator;

pub use batch_runner::{BatchOutcome, BatchReconciler, BatchSettings, DEFAULT_CHUNK_SIZE};
pub use dispute_aggregator::{
    DEPARTMENTS, DisputeRecord, DisputeReport, DisputeSummary, Priority, WorkflowStatus,
    assess_priority, assign_department, build_dispute_report, describe_dispute, workflow_status,
};
