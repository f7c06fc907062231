//! Sanitised-store abstraction
//!
//! The trait the pipeline and the query gateway program against. Only
//! pseudonymous identifiers cross this seam; the reverse mapping is not
//! representable here at all.

use crate::domain::record::{CompanySummary, InspectionRecord, QueryFilter};
use crate::domain::result::Result;
use crate::domain::Pseudonym;
use async_trait::async_trait;

/// Storage backend for sanitised inspection records
///
/// Writes are full-replace: each sanitisation run overwrites the whole
/// table, never appends. Reads are bounded and read-only.
#[async_trait]
pub trait InspectionStore: Send + Sync {
    /// Ensure the backing schema exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created or accessed.
    async fn ensure_schema(&self) -> Result<()>;

    /// Replace the stored table with the given records
    ///
    /// Atomic with respect to readers: either the previous table or the
    /// new one is visible, never a partial mix.
    ///
    /// # Returns
    ///
    /// The number of records written.
    async fn replace_all(&self, records: &[InspectionRecord]) -> Result<usize>;

    /// Return up to `filter.limit` records matching all supplied
    /// filters, in stored order
    async fn query(&self, filter: &QueryFilter) -> Result<Vec<InspectionRecord>>;

    /// Aggregate statistics for one company's rows
    ///
    /// An unknown company yields [`CompanySummary::empty`], not an error.
    async fn company_summary(&self, company_id: &Pseudonym) -> Result<CompanySummary>;

    /// Distinct company pseudonyms present in the store, sorted
    async fn list_companies(&self) -> Result<Vec<Pseudonym>>;
}
