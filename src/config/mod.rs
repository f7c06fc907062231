//! Configuration management for Ironveil.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}` syntax), `IRONVEIL_*` overrides, per-section
//! validation, and secret-protected credentials.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [azure]
//! endpoint = "https://myaccount.blob.core.windows.net"
//! container = "raw-inspection-data"
//! blob_name = "raw_inspection_data.csv"
//! sas_token = "${IRONVEIL_AZURE_SAS}"
//!
//! [storage]
//! connection_string = "${IRONVEIL_PG_CONNECTION}"
//!
//! [snapshot]
//! path = "data/client_mapping.json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AzureConfig, Environment, GatewayConfig, IronveilConfig, LoggingConfig,
    SnapshotConfig, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
