//! Sanitisation run coordinator
//!
//! Orchestrates one end-to-end run: download the raw table, decode it,
//! sanitise every sensitive column, replace the sanitised store, and
//! persist the mapping snapshot. Fatal errors at any step abort the
//! run before the store or the previous snapshot is overwritten, so a
//! run is all-or-nothing by construction.

use crate::adapters::azure::BlobStoreClient;
use crate::adapters::store::{InspectionStore, MemoryStore, PostgresStore};
use crate::adapters::table;
use crate::config::IronveilConfig;
use crate::core::anonymize::MappingSnapshot;
use crate::core::pipeline::summary::RunSummary;
use crate::core::sanitize::Sanitizer;
use crate::domain::pseudonym::PseudonymCategory;
use crate::domain::result::Result;
use crate::domain::IronveilError;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Coordinator for one sanitisation run
pub struct PipelineCoordinator {
    config: IronveilConfig,
    blob_client: BlobStoreClient,
    store: Arc<dyn InspectionStore>,
}

impl PipelineCoordinator {
    /// Creates a coordinator from validated configuration
    ///
    /// A dry run gets a volatile in-memory store so nothing persistent
    /// is touched; otherwise the PostgreSQL store is connected.
    pub fn new(config: IronveilConfig) -> Result<Self> {
        let blob_client = BlobStoreClient::new(&config.azure)?;

        let store: Arc<dyn InspectionStore> = if config.application.dry_run {
            tracing::info!("Dry run: using in-memory store");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(PostgresStore::connect(&config.storage)?)
        };

        Ok(Self {
            config,
            blob_client,
            store,
        })
    }

    /// Executes the run: download, decode, sanitise, store, snapshot
    pub async fn execute_run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        tracing::info!(blob = %self.config.azure.blob_name, "Starting sanitisation run");

        let raw_bytes = self
            .blob_client
            .download_blob(&self.config.azure.blob_name)
            .await?;

        let raw_records = table::decode_records(&raw_bytes)?;

        let mut sanitizer = Sanitizer::new();
        let clean_records = sanitizer.sanitize(&raw_records);
        let mapping = sanitizer.into_mapping();

        let mut summary = RunSummary::new();
        summary.records_loaded = raw_records.len();
        summary.companies_mapped = mapping.category_count(PseudonymCategory::Company);
        summary.pipelines_mapped = mapping.category_count(PseudonymCategory::Pipeline);
        summary.dry_run = self.config.application.dry_run;

        tracing::info!(
            records = clean_records.len(),
            companies = summary.companies_mapped,
            pipelines = summary.pipelines_mapped,
            "Table sanitised"
        );

        // Store replace and snapshot write happen only after the whole
        // table sanitised cleanly; full-overwrite semantics per run.
        self.store.ensure_schema().await?;
        summary.records_stored = self.store.replace_all(&clean_records).await?;

        let snapshot = mapping.snapshot(Utc::now());
        if self.config.application.dry_run {
            tracing::info!("Dry run: skipping mapping snapshot write");
        } else {
            write_snapshot(&snapshot, Path::new(&self.config.snapshot.path))?;
            tracing::info!(path = %self.config.snapshot.path, "Mapping snapshot written");
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }
}

/// Persists a mapping snapshot as pretty-printed JSON
///
/// Written to a temporary sibling and renamed into place, so a crash
/// mid-write cannot leave a truncated snapshot behind.
pub fn write_snapshot(snapshot: &MappingSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                IronveilError::Snapshot(format!(
                    "Failed to create snapshot directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(|e| {
        IronveilError::Snapshot(format!("Failed to write {}: {e}", tmp_path.display()))
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        IronveilError::Snapshot(format!("Failed to move snapshot into place: {e}"))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anonymize::MappingTable;

    #[test]
    fn test_write_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_mapping.json");

        let mut mapping = MappingTable::new();
        mapping.resolve("Acme Industrial Corp", PseudonymCategory::Company);
        mapping.resolve("North Pipeline", PseudonymCategory::Pipeline);
        let snapshot = mapping.snapshot(Utc::now());

        write_snapshot(&snapshot, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: MappingSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
        // The persisted field names are part of the snapshot contract
        assert!(text.contains("\"created_at\""));
        assert!(text.contains("\"client_mapping\""));
        assert!(text.contains("\"reverse_mapping\""));
    }

    #[test]
    fn test_write_snapshot_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_mapping.json");

        let mut first = MappingTable::new();
        first.resolve("Acme", PseudonymCategory::Company);
        write_snapshot(&first.snapshot(Utc::now()), &path).unwrap();

        let mut second = MappingTable::new();
        second.resolve("Globex", PseudonymCategory::Company);
        write_snapshot(&second.snapshot(Utc::now()), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        // Full overwrite: no merge with the prior snapshot
        assert!(!text.contains("Acme"));
        assert!(text.contains("Globex"));
    }
}
