//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for trade sources, result sinks, and progress
//! - **Services**: Batch reconciliation and dispute aggregation
//! - **Use Cases**: End-to-end reconciliation runs

pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::*;
pub use services::*;
pub use use_cases::*;
