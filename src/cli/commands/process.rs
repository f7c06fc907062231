//! Process command implementation
//!
//! Runs one full sanitisation run: download the raw blob, sanitise it,
//! replace the local store, and write the mapping snapshot.

use crate::config::load_config;
use crate::core::pipeline::PipelineCoordinator;
use clap::Args;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Dry run mode - sanitise in memory without writing the store or
    /// the snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Override the blob to download
    #[arg(long)]
    pub blob: Option<String>,
}

impl ProcessArgs {
    /// Execute the process command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting process command");

        let mut config = load_config(config_path)?;

        if let Some(blob) = &self.blob {
            tracing::info!(blob = %blob, "Overriding blob name from CLI");
            config.azure.blob_name = blob.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
            println!("DRY RUN - no data will be written");
            println!();
        }

        let coordinator = match PipelineCoordinator::new(config) {
            Ok(coordinator) => coordinator,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize pipeline");
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(5);
            }
        };

        match coordinator.execute_run().await {
            Ok(summary) => {
                println!("Sanitisation run complete");
                println!("  Records loaded:   {}", summary.records_loaded);
                println!("  Records stored:   {}", summary.records_stored);
                println!("  Companies mapped: {}", summary.companies_mapped);
                println!("  Pipelines mapped: {}", summary.pipelines_mapped);
                println!("  Duration:         {:.2?}", summary.duration);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Sanitisation run failed");
                eprintln!("Sanitisation run failed: {e}");
                Ok(5)
            }
        }
    }
}
