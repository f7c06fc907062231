//! Bidirectional anonymisation mapping
//!
//! The mapping table is run-scoped, single-owner state: created empty at
//! the start of a sanitisation run, grown insert-only as new names are
//! seen, and discarded after its snapshot is persisted. It is never
//! reloaded or merged across runs.

use crate::core::anonymize::hasher::hash_suffix;
use crate::domain::pseudonym::{Pseudonym, PseudonymCategory};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// In-memory bidirectional mapping between original names and pseudonyms
///
/// Within one run the forward mapping is a total function: the same
/// original name always yields the same pseudonym once first
/// encountered. The mapping is not guaranteed injective: two distinct
/// names may hash to the same suffix, in which case the reverse entry
/// reflects the last writer. That is an accepted, bounded-probability
/// property of the 1000-wide suffix space, not a failure.
#[derive(Debug, Default)]
pub struct MappingTable {
    forward: HashMap<String, Pseudonym>,
    reverse: HashMap<Pseudonym, String>,
}

impl MappingTable {
    /// Creates an empty mapping table for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an original name to its pseudonym, extending the mapping
    /// on first encounter
    ///
    /// Idempotent for a name already present: the stored pseudonym is
    /// returned without recomputation and without touching the reverse
    /// mapping. For a new name the suffix is derived from the name's
    /// content hash, both directions are inserted, and a reverse entry
    /// already occupied by a colliding name is overwritten.
    pub fn resolve(&mut self, original_name: &str, category: PseudonymCategory) -> Pseudonym {
        if let Some(existing) = self.forward.get(original_name) {
            return existing.clone();
        }

        let pseudonym = Pseudonym::derived(category, hash_suffix(original_name));
        self.forward
            .insert(original_name.to_string(), pseudonym.clone());
        self.reverse
            .insert(pseudonym.clone(), original_name.to_string());

        tracing::debug!(
            category = %category,
            pseudonym = %pseudonym,
            "Mapped new identifier"
        );

        pseudonym
    }

    /// Looks up the pseudonym for a name without extending the mapping
    pub fn get(&self, original_name: &str) -> Option<&Pseudonym> {
        self.forward.get(original_name)
    }

    /// Number of distinct original names mapped so far
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether any names have been mapped
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of mapped names whose pseudonym belongs to a category
    pub fn category_count(&self, category: PseudonymCategory) -> usize {
        let prefix = format!("{}_", category.prefix());
        self.forward
            .values()
            .filter(|p| p.as_str().starts_with(&prefix))
            .count()
    }

    /// Produces an immutable snapshot of both mappings
    ///
    /// Does not mutate internal state. Companies and pipelines share one
    /// flattened forward/reverse pair, disambiguated by prefix; this is
    /// the persisted shape downstream consumers read.
    pub fn snapshot(&self, created_at: DateTime<Utc>) -> MappingSnapshot {
        MappingSnapshot {
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            client_mapping: self
                .forward
                .iter()
                .map(|(name, p)| (name.clone(), p.as_str().to_string()))
                .collect(),
            reverse_mapping: self
                .reverse
                .iter()
                .map(|(p, name)| (p.as_str().to_string(), name.clone()))
                .collect(),
        }
    }
}

/// Persisted artifact of one sanitisation run's mapping
///
/// Written fresh each run with full-overwrite semantics; never merged
/// with prior snapshots. Maps are ordered so the serialized form is
/// stable for a given mapping state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSnapshot {
    /// ISO-8601 creation timestamp
    pub created_at: String,

    /// OriginalName -> Pseudonym, both categories flattened
    pub client_mapping: BTreeMap<String, String>,

    /// Pseudonym -> OriginalName (last writer on collision)
    pub reverse_mapping: BTreeMap<String, String>,
}
