//! Configuration schema types

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Ironveil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IronveilConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Azure Blob source configuration
    pub azure: AzureConfig,

    /// Sanitised store (PostgreSQL) configuration
    pub storage: StorageConfig,

    /// Mapping snapshot configuration
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Query gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IronveilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.azure.validate(&self.environment)?;
        self.storage.validate()?;
        self.snapshot.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (no store write, no snapshot write)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Azure Blob source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Storage endpoint, e.g. `https://myaccount.blob.core.windows.net`
    pub endpoint: String,

    /// Container holding the raw inspection data
    #[serde(default = "default_container")]
    pub container: String,

    /// Blob to download each run
    #[serde(default = "default_blob_name")]
    pub blob_name: String,

    /// SAS token for the container (usually `${IRONVEIL_AZURE_SAS}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sas_token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl AzureConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("azure.endpoint cannot be empty".to_string());
        }
        // Plain HTTP is tolerated only outside production (local
        // emulators, mock servers).
        if *environment == Environment::Production && !self.endpoint.starts_with("https://") {
            return Err("azure.endpoint must use https:// in production".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "azure.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        if self.container.trim().is_empty() {
            return Err("azure.container cannot be empty".to_string());
        }
        if self.blob_name.trim().is_empty() {
            return Err("azure.blob_name cannot be empty".to_string());
        }
        if *environment == Environment::Production && self.sas_token.is_none() {
            return Err("azure.sas_token is required in production".to_string());
        }
        if self.request_timeout_seconds == 0 {
            return Err("azure.request_timeout_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Sanitised store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// PostgreSQL connection string
    /// (usually `${IRONVEIL_PG_CONNECTION}`)
    pub connection_string: SecretString,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Pool connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;
        if self.connection_string.expose_secret().is_empty() {
            return Err("storage.connection_string cannot be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("storage.max_connections must be at least 1".to_string());
        }
        if self.connection_timeout_seconds == 0 {
            return Err("storage.connection_timeout_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Mapping snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Path of the persisted mapping snapshot
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl SnapshotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("snapshot.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

/// Query gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Row limit applied when a query specifies none
    #[serde(default = "default_query_limit")]
    pub default_limit: usize,

    /// Upper bound on any requested limit
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("gateway.default_limit must be at least 1".to_string());
        }
        if self.max_limit < self.default_limit {
            return Err("gateway.max_limit cannot be below gateway.default_limit".to_string());
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_limit: default_query_limit(),
            max_limit: default_max_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_container() -> String {
    "raw-inspection-data".to_string()
}

fn default_blob_name() -> String {
    "raw_inspection_data.csv".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> usize {
    4
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_snapshot_path() -> String {
    "data/client_mapping.json".to_string()
}

fn default_query_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    1000
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
