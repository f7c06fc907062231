//! Run summary and reporting

use std::time::Duration;

/// Summary of one sanitisation run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Rows decoded from the raw table
    pub records_loaded: usize,

    /// Rows written to the sanitised store
    pub records_stored: usize,

    /// Distinct company names mapped during the run
    pub companies_mapped: usize,

    /// Distinct pipeline names mapped during the run
    pub pipelines_mapped: usize,

    /// Whether the run skipped persistent writes
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Total distinct names mapped across both categories
    pub fn total_mapped(&self) -> usize {
        self.companies_mapped + self.pipelines_mapped
    }
}
