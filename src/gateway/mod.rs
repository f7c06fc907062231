//! Query gateway
//!
//! Bounded read-only queries over the sanitised store, operating on
//! pseudonymous identifiers only. The reverse mapping is not reachable
//! through this layer: the gateway holds a store handle and nothing
//! else. Validation errors are per-request and never affect persisted
//! state or other requests.

pub mod server;

use crate::adapters::store::InspectionStore;
use crate::config::schema::GatewayConfig;
use crate::domain::record::{CompanySummary, InspectionRecord, QueryFilter};
use crate::domain::result::Result;
use crate::domain::{IronveilError, Pseudonym, RiskLevel};
use std::str::FromStr;
use std::sync::Arc;

/// Read-only query surface over the sanitised store
pub struct QueryGateway {
    store: Arc<dyn InspectionStore>,
    config: GatewayConfig,
}

impl QueryGateway {
    /// Creates a gateway over a store
    pub fn new(store: Arc<dyn InspectionStore>, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    /// Returns up to `limit` records matching all supplied filters
    ///
    /// No filters means "match all, limited to the default". An invalid
    /// `risk_level` value is rejected at this boundary, not silently
    /// ignored.
    pub async fn query(
        &self,
        company_id: Option<&str>,
        risk_level: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<InspectionRecord>> {
        let company_id = company_id
            .map(|id| Pseudonym::new(id).map_err(IronveilError::Validation))
            .transpose()?;

        let risk_level = risk_level
            .map(|level| RiskLevel::from_str(level).map_err(IronveilError::Validation))
            .transpose()?;

        let limit = limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);

        let filter = QueryFilter {
            company_id,
            risk_level,
            limit,
        };

        tracing::debug!(?filter, "Gateway query");
        self.store.query(&filter).await
    }

    /// Aggregate statistics for one company
    ///
    /// An unknown company yields the zero aggregate, not an error.
    pub async fn company_summary(&self, company_id: &str) -> Result<CompanySummary> {
        let company_id = Pseudonym::new(company_id).map_err(IronveilError::Validation)?;
        self.store.company_summary(&company_id).await
    }

    /// Distinct company pseudonyms present in the store
    pub async fn list_companies(&self) -> Result<Vec<Pseudonym>> {
        self.store.list_companies().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;

    fn gateway_over_empty_store() -> QueryGateway {
        QueryGateway::new(Arc::new(MemoryStore::new()), GatewayConfig::default())
    }

    #[tokio::test]
    async fn test_invalid_risk_level_rejected() {
        let gateway = gateway_over_empty_store();
        let err = gateway
            .query(None, Some("catastrophic"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IronveilError::Validation(_)));
    }

    #[tokio::test]
    async fn test_empty_company_id_rejected() {
        let gateway = gateway_over_empty_store();
        let err = gateway.query(Some(""), None, None).await.unwrap_err();
        assert!(matches!(err, IronveilError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_company_summary_is_zero_not_error() {
        let gateway = gateway_over_empty_store();
        let summary = gateway.company_summary("Company_999").await.unwrap();
        assert_eq!(summary.total_inspections, 0);
        assert!(summary.avg_metal_loss.is_none());
    }
}
