//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types;
//! transfer and store failures carry their own enums so callers can
//! distinguish fatal-for-the-run conditions from per-request ones.

use thiserror::Error;

/// Main Ironveil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum IronveilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream transfer errors (Azure Blob retrieval)
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Sanitised store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors (gateway boundary, malformed input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot persistence errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Transfer-specific errors
///
/// Errors that occur when fetching the raw data file from Azure Blob
/// Storage. These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Failed to connect to blob storage
    #[error("Failed to connect to blob storage: {0}")]
    ConnectionFailed(String),

    /// Authentication failed (expired or missing SAS token)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Blob not found in the container
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Unexpected response from the storage endpoint
    #[error("Invalid response from storage endpoint: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Store-specific errors
///
/// Errors that occur when writing to or querying the sanitised store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Failed to apply the store schema
    #[error("Failed to apply schema: {0}")]
    SchemaFailed(String),

    /// Failed to write records
    #[error("Failed to write records: {0}")]
    WriteFailed(String),

    /// Failed to query records
    #[error("Failed to query records: {0}")]
    QueryFailed(String),

    /// Failed to decode a stored row back into a record
    #[error("Failed to decode stored row: {0}")]
    RowDecodeFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for IronveilError {
    fn from(err: std::io::Error) -> Self {
        IronveilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for IronveilError {
    fn from(err: serde_json::Error) -> Self {
        IronveilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for IronveilError {
    fn from(err: toml::de::Error) -> Self {
        IronveilError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv decode errors
impl From<csv::Error> for IronveilError {
    fn from(err: csv::Error) -> Self {
        IronveilError::Serialization(format!("CSV error: {err}"))
    }
}
