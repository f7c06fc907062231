//! Azure Blob Storage retrieval
//!
//! Thin download-only client: one SAS-authenticated GET per run. No
//! SDK types leak out of this module; failures map onto
//! [`TransferError`] variants so the coordinator can abort the run
//! before anything is overwritten.

use crate::config::schema::AzureConfig;
use crate::domain::errors::TransferError;
use crate::domain::result::Result;
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Download-only blob client
pub struct BlobStoreClient {
    http_client: reqwest::Client,
    endpoint: Url,
    container: String,
    sas_token: Option<String>,
}

impl BlobStoreClient {
    /// Creates a client from Azure configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(config: &AzureConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            TransferError::ConnectionFailed(format!(
                "Invalid storage endpoint '{}': {e}",
                config.endpoint
            ))
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                TransferError::ConnectionFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        let sas_token = config.sas_token.as_ref().map(|token| {
            token
                .expose_secret()
                .as_ref()
                .trim_start_matches('?')
                .to_string()
        });

        Ok(Self {
            http_client,
            endpoint,
            container: config.container.clone(),
            sas_token,
        })
    }

    /// Downloads one blob, returning its raw bytes
    ///
    /// # Errors
    ///
    /// Any network, auth, or not-found condition is fatal for the run:
    /// no partial-table processing happens downstream.
    pub async fn download_blob(&self, blob_name: &str) -> Result<Vec<u8>> {
        let mut blob_url = self
            .endpoint
            .join(&format!("{}/{}", self.container, blob_name))
            .map_err(|e| {
                TransferError::ConnectionFailed(format!("Invalid blob path '{blob_name}': {e}"))
            })?;
        if let Some(ref sas) = self.sas_token {
            blob_url.set_query(Some(sas));
        }

        tracing::info!(container = %self.container, blob = %blob_name, "Downloading blob");

        let response = self
            .http_client
            .get(blob_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransferError::Timeout(e.to_string())
                } else {
                    TransferError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = match status.as_u16() {
                401 | 403 => TransferError::AuthenticationFailed(format!(
                    "storage endpoint returned {status}"
                )),
                404 => TransferError::BlobNotFound(blob_name.to_string()),
                s if status.is_server_error() => TransferError::ServerError {
                    status: s,
                    message: status.canonical_reason().unwrap_or("unknown").to_string(),
                },
                _ => TransferError::InvalidResponse(format!(
                    "unexpected status {status} for blob '{blob_name}'"
                )),
            };
            return Err(err.into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransferError::InvalidResponse(e.to_string()))?;

        tracing::info!(bytes = bytes.len(), blob = %blob_name, "Blob downloaded");
        Ok(bytes.to_vec())
    }
}
