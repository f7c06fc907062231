//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config = %config_path, "Validating configuration");

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration valid: {config_path}");
                println!("  Environment:  {:?}", config.environment);
                println!("  Azure source: {}/{}", config.azure.container, config.azure.blob_name);
                println!("  Snapshot:     {}", config.snapshot.path);
                println!(
                    "  Gateway:      default_limit={}, max_limit={}",
                    config.gateway.default_limit, config.gateway.max_limit
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration invalid");
                eprintln!("Configuration invalid: {e}");
                Ok(2)
            }
        }
    }
}
