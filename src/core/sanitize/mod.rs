//! Table sanitiser
//!
//! Applies the mapping table to every sensitive column of an input
//! table, producing a sanitised table with identical shape. The
//! sanitiser owns the run's [`MappingTable`]; resolving names mutates
//! the table, the input rows are never mutated.

use crate::core::anonymize::MappingTable;
use crate::domain::pseudonym::PseudonymCategory;
use crate::domain::record::InspectionRecord;

/// Row-wise sanitiser for one run
///
/// A missing name value decodes as the empty string upstream and is
/// resolved like any other name; rows are never skipped or reordered.
#[derive(Debug, Default)]
pub struct Sanitizer {
    mapping: MappingTable,
}

impl Sanitizer {
    /// Creates a sanitiser with a fresh, empty mapping table
    pub fn new() -> Self {
        Self {
            mapping: MappingTable::new(),
        }
    }

    /// Produces the sanitised copy of a table
    ///
    /// The output has the same row count, row order, and column set as
    /// the input. `client_name` and `pipeline_name` are replaced by
    /// their pseudonyms; every other field is copied unchanged.
    pub fn sanitize(&mut self, records: &[InspectionRecord]) -> Vec<InspectionRecord> {
        records
            .iter()
            .map(|record| {
                let mut clean = record.clone();
                clean.client_name = self
                    .mapping
                    .resolve(&record.client_name, PseudonymCategory::Company)
                    .into_inner();
                clean.pipeline_name = self
                    .mapping
                    .resolve(&record.pipeline_name, PseudonymCategory::Pipeline)
                    .into_inner();
                clean
            })
            .collect()
    }

    /// Read access to the run's mapping table
    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Consumes the sanitiser, yielding the mapping table for snapshotting
    pub fn into_mapping(self) -> MappingTable {
        self.mapping
    }
}
