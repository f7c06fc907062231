//! Core business logic
//!
//! The anonymisation mapping engine, the table sanitiser, and the run
//! coordinator that ties them to the adapters.

pub mod anonymize;
pub mod pipeline;
pub mod sanitize;
