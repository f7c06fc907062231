//! Sanitisation run orchestration

pub mod coordinator;
pub mod summary;

pub use coordinator::{write_snapshot, PipelineCoordinator};
pub use summary::RunSummary;
