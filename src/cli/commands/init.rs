//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ironveil.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            eprintln!("Configuration file already exists: {}", self.output);
            eprintln!("Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, STARTER_CONFIG) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your storage account and container", self.output);
                println!("  2. Set IRONVEIL_AZURE_SAS and IRONVEIL_PG_CONNECTION in .env");
                println!("  3. Validate: ironveil validate-config");
                println!("  4. Run: ironveil process");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to write configuration file: {e}");
                Ok(5)
            }
        }
    }
}

const STARTER_CONFIG: &str = r#"# Ironveil Configuration File
# Anonymising ETL for pipeline inspection records

# Runtime environment (development, staging, production)
environment = "development"

[application]
log_level = "info"
dry_run = false

[azure]
# Azure Blob Storage endpoint of the raw data account
endpoint = "https://myaccount.blob.core.windows.net"
container = "raw-inspection-data"
blob_name = "raw_inspection_data.csv"
# SAS token with read access to the container
sas_token = "${IRONVEIL_AZURE_SAS}"
request_timeout_seconds = 30

[storage]
# PostgreSQL connection string for the sanitised store
connection_string = "${IRONVEIL_PG_CONNECTION}"
max_connections = 4
connection_timeout_seconds = 10

[snapshot]
# Anonymisation mapping snapshot (overwritten each run)
path = "data/client_mapping.json"

[gateway]
default_limit = 10
max_limit = 1000

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_parses_and_validates() {
        std::env::set_var("IRONVEIL_AZURE_SAS", "sv=test&sig=abc");
        std::env::set_var("IRONVEIL_PG_CONNECTION", "host=localhost user=ironveil");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ironveil.toml");
        fs::write(&path, STARTER_CONFIG).unwrap();

        let config = crate::config::load_config(&path).unwrap();
        assert_eq!(config.azure.container, "raw-inspection-data");
        assert_eq!(config.gateway.default_limit, 10);

        std::env::remove_var("IRONVEIL_AZURE_SAS");
        std::env::remove_var("IRONVEIL_PG_CONNECTION");
    }
}
