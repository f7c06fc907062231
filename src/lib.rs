// Ironveil - Anonymising ETL for Pipeline Inspection Records
// Copyright (c) 2025 Ironveil Contributors
// Licensed under the MIT License

//! # Ironveil - Anonymising ETL for Pipeline Inspection Records
//!
//! Ironveil downloads raw in-line inspection data from Azure Blob
//! Storage, replaces the sensitive company and pipeline names with
//! stable pseudonymous identifiers, persists the sanitised table in a
//! local PostgreSQL store, and answers bounded read-only queries over
//! it using pseudonyms only.
//!
//! ## Architecture
//!
//! Ironveil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (anonymisation mapping, sanitiser, run coordinator)
//! - [`adapters`] - External integrations (Azure Blob, CSV codec, store backends)
//! - [`gateway`] - Read-only query surface over the sanitised store
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ironveil::config::load_config;
//! use ironveil::core::pipeline::PipelineCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ironveil.toml")?;
//!     let coordinator = PipelineCoordinator::new(config)?;
//!     let summary = coordinator.execute_run().await?;
//!     println!("Stored {} sanitised records", summary.records_stored);
//!     Ok(())
//! }
//! ```
//!
//! ## The mapping invariant
//!
//! Within one run, every original name resolves to exactly one
//! pseudonym (`<prefix>_<NNN>`, suffix derived from a truncated
//! SHA-256). Distinct names may collide in the 1000-wide suffix space;
//! the reverse mapping then reflects the last writer. The mapping is
//! run-scoped: snapshots are full overwrites, never merged.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod gateway;
pub mod logging;
