//! JSON-lines gateway transport
//!
//! One request object per stdin line, one JSON response per stdout
//! line. Requests are served strictly in order; a malformed or invalid
//! request is answered in-band with an error object and does not stop
//! the server. The loop ends at EOF.

use crate::domain::result::Result;
use crate::gateway::QueryGateway;
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// One gateway request, tagged by operation
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GatewayRequest {
    /// Filtered record query
    Query {
        company_id: Option<String>,
        risk_level: Option<String>,
        limit: Option<usize>,
    },
    /// Per-company aggregate
    CompanySummary { company_id: String },
    /// Distinct companies in the store
    ListCompanies,
}

/// Stdio server wrapping a [`QueryGateway`]
pub struct GatewayServer {
    gateway: QueryGateway,
}

impl GatewayServer {
    /// Creates a server over a gateway
    pub fn new(gateway: QueryGateway) -> Self {
        Self { gateway }
    }

    /// Serves requests from stdin until EOF
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        tracing::info!("Gateway serving on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line).await;
            let mut out = response.to_string();
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }

        tracing::info!("Gateway input closed, shutting down");
        Ok(())
    }

    /// Answers one request line; errors become in-band responses
    async fn handle_line(&self, line: &str) -> serde_json::Value {
        let request: GatewayRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return json!({ "error": format!("Malformed request: {e}") });
            }
        };

        match self.dispatch(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Request failed");
                json!({ "error": e.to_string() })
            }
        }
    }

    async fn dispatch(&self, request: GatewayRequest) -> Result<serde_json::Value> {
        match request {
            GatewayRequest::Query {
                company_id,
                risk_level,
                limit,
            } => {
                let records = self
                    .gateway
                    .query(company_id.as_deref(), risk_level.as_deref(), limit)
                    .await?;
                Ok(json!({ "records": records }))
            }
            GatewayRequest::CompanySummary { company_id } => {
                let summary = self.gateway.company_summary(&company_id).await?;
                Ok(serde_json::to_value(summary)?)
            }
            GatewayRequest::ListCompanies => {
                let companies = self.gateway.list_companies().await?;
                Ok(json!({ "companies": companies }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parse_query() {
        let request: GatewayRequest =
            serde_json::from_str(r#"{"op":"query","company_id":"Company_007","limit":2}"#)
                .unwrap();
        assert!(matches!(
            request,
            GatewayRequest::Query {
                company_id: Some(_),
                risk_level: None,
                limit: Some(2)
            }
        ));
    }

    #[test]
    fn test_request_parse_list_companies() {
        let request: GatewayRequest = serde_json::from_str(r#"{"op":"list_companies"}"#).unwrap();
        assert!(matches!(request, GatewayRequest::ListCompanies));
    }

    #[test]
    fn test_request_rejects_unknown_op() {
        // Only the three read-only operations exist on this surface
        assert!(serde_json::from_str::<GatewayRequest>(r#"{"op":"drop_table"}"#).is_err());
        assert!(serde_json::from_str::<GatewayRequest>(r#"{"op":"reverse_lookup"}"#).is_err());
    }
}
