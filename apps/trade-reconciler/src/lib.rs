// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Trade Reconciler - Rust Core Library
//!
//! Deterministic billing reconciliation for captured equity and FX trades.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure reconciliation logic
//!   - `trade`: Equity/FX trade records
//!   - `fees`: Expected fee derivation
//!   - `dispute`: Hash-seeded dispute classification and invoice mutation
//!   - `reconciliation`: Expected vs invoiced comparison
//!
//! - **Application**: Orchestration
//!   - `ports`: `TradeSourcePort`, `ResultSinkPort`, `ProgressReporter`
//!   - `services`: Chunked batch runner, dispute report
//!   - `use_cases`: `ReconcileTrades`
//!
//! - **Infrastructure**: Adapters
//!   - `ingestion`: Lenient JSON trade loading
//!   - `persistence`: In-memory result sink

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases, services, and port definitions.
pub mod application;

/// Infrastructure layer - Adapters for trade sources and result sinks.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::services::{
    BatchOutcome, BatchReconciler, BatchSettings, DisputeReport, build_dispute_report,
};
pub use application::use_cases::ReconcileTradesUseCase;
pub use domain::dispute::{DisputeClassification, DisputeType, classify};
pub use domain::fees::{FeeBreakdown, derive_expected_costs};
pub use domain::reconciliation::{
    Invoice, ReconciliationComparator, ReconciliationResult, ReconciliationStatus, reconcile,
    reconcile_trade,
};
pub use domain::shared::{Money, TradeId, simple_additive_hash};
pub use domain::trade::{EquityTrade, FxTrade, TradeRecord, calculate_total_amount};
