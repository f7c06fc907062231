//! Serve command implementation
//!
//! Starts the query gateway over stdio: JSON-line requests in, JSON
//! responses out, until EOF.

use crate::adapters::store::PostgresStore;
use crate::config::load_config;
use crate::gateway::server::GatewayServer;
use crate::gateway::QueryGateway;
use clap::Args;
use std::sync::Arc;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting gateway");

        let config = load_config(config_path)?;

        let store = match PostgresStore::connect(&config.storage) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to store");
                eprintln!("Failed to connect to store: {e}");
                return Ok(5);
            }
        };

        if let Err(e) = store.test_connection().await {
            tracing::error!(error = %e, "Store connection test failed");
            eprintln!("Store connection test failed: {e}");
            return Ok(5);
        }

        let gateway = QueryGateway::new(store, config.gateway.clone());
        let server = GatewayServer::new(gateway);

        if let Err(e) = server.run().await {
            tracing::error!(error = %e, "Gateway terminated with error");
            eprintln!("Gateway terminated with error: {e}");
            return Ok(5);
        }

        Ok(0)
    }
}
