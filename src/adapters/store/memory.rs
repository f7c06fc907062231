//! In-process store implementation
//!
//! Semantically identical to the PostgreSQL store but backed by a
//! `Vec`. Used by dry runs (nothing must touch disk) and by tests that
//! exercise gateway semantics without a database.

use crate::adapters::store::traits::InspectionStore;
use crate::domain::record::{CompanySummary, InspectionRecord, QueryFilter};
use crate::domain::result::Result;
use crate::domain::{Pseudonym, RiskLevel};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

/// Volatile inspection store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<InspectionRecord>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records (test convenience)
    pub fn with_records(records: Vec<InspectionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn replace_all(&self, records: &[InspectionRecord]) -> Result<usize> {
        let mut guard = self.records.write().await;
        *guard = records.to_vec();
        Ok(guard.len())
    }

    async fn query(&self, filter: &QueryFilter) -> Result<Vec<InspectionRecord>> {
        let guard = self.records.read().await;
        let matches = guard
            .iter()
            .filter(|r| {
                filter
                    .company_id
                    .as_ref()
                    .map_or(true, |id| r.client_name == id.as_str())
            })
            .filter(|r| {
                filter
                    .risk_level
                    .map_or(true, |level| r.risk_level == level)
            })
            .take(filter.limit)
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn company_summary(&self, company_id: &Pseudonym) -> Result<CompanySummary> {
        let guard = self.records.read().await;
        let rows: Vec<&InspectionRecord> = guard
            .iter()
            .filter(|r| r.client_name == company_id.as_str())
            .collect();

        if rows.is_empty() {
            return Ok(CompanySummary::empty());
        }

        let total = rows.len() as u64;
        let avg = rows.iter().map(|r| r.metal_loss_percent).sum::<f64>() / rows.len() as f64;
        Ok(CompanySummary {
            total_inspections: total,
            avg_metal_loss: Some(avg),
            critical_count: rows
                .iter()
                .filter(|r| r.risk_level == RiskLevel::Critical)
                .count() as u64,
            high_count: rows
                .iter()
                .filter(|r| r.risk_level == RiskLevel::High)
                .count() as u64,
            defects_found: rows.iter().filter(|r| r.defect_type != "none").count() as u64,
        })
    }

    async fn list_companies(&self) -> Result<Vec<Pseudonym>> {
        let guard = self.records.read().await;
        let distinct: BTreeSet<&str> = guard.iter().map(|r| r.client_name.as_str()).collect();
        Ok(distinct
            .into_iter()
            .filter_map(|name| Pseudonym::new(name).ok())
            .collect())
    }
}
