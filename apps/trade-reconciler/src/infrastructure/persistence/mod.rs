//! Persistence Adapters
//!
//! Result sink implementations.

pub mod in_memory;

pub use in_memory::InMemoryResultSink;
