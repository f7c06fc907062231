//! Inspection record domain model
//!
//! [`InspectionRecord`] is a fixed-schema row type: every column of the
//! raw table is a named, typed field, so field-name drift is caught at
//! compile time instead of at query time. The two sensitive columns
//! (`client_name`, `pipeline_name`) hold original names before
//! sanitisation and pseudonyms after; all other columns pass through a
//! run unchanged.

use crate::domain::pseudonym::{Pseudonym, RiskLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the inspection table
///
/// Field order matches the raw CSV column order; the CSV codec relies
/// on the header names, not the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    // Client identification (sensitive, subject to substitution)
    pub client_name: String,
    pub pipeline_name: String,

    // Inspection metadata
    pub inspection_date: NaiveDate,
    pub inspection_id: String,
    pub inspection_tool: String,

    // Pipeline location
    pub pipeline_segment: String,
    pub girth_weld_location: String,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,

    // Wall thickness measurements
    pub wall_thickness_nominal_mm: f64,
    pub wall_thickness_actual_mm: f64,
    pub metal_loss_mm: f64,
    pub metal_loss_percent: f64,

    // Defect characterisation
    pub defect_type: String,
    pub defect_severity: RiskLevel,
    pub defect_length_mm: f64,
    pub defect_width_mm: f64,
    pub defect_depth_mm: f64,

    // Pressure data
    pub operating_pressure_bar: f64,
    pub maop_bar: f64,

    // Pipeline characteristics
    pub pipe_diameter_mm: i32,
    pub pipe_grade: String,

    // Risk assessment
    pub risk_level: RiskLevel,
    pub failure_probability: f64,
    pub recommended_action: String,
    pub next_inspection_months: i32,

    // Environmental factors
    pub soil_type: String,
    pub coating_condition: String,
    pub cathodic_protection: String,
}

/// Filter for bounded read-only queries over the sanitised store
///
/// All supplied filters combine with logical AND; no filters means
/// "match all, limited to `limit`".
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    /// Restrict to rows whose (pseudonymous) `client_name` matches
    pub company_id: Option<Pseudonym>,

    /// Restrict to rows with this risk level
    pub risk_level: Option<RiskLevel>,

    /// Maximum number of rows returned, in stored order
    pub limit: usize,
}

/// Aggregate statistics for one company's stored rows
///
/// An unknown company yields the zero aggregate (`avg_metal_loss` is
/// `None`), never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// Total rows stored for the company
    pub total_inspections: u64,

    /// Mean of `metal_loss_percent` over those rows
    pub avg_metal_loss: Option<f64>,

    /// Rows with `risk_level = critical`
    pub critical_count: u64,

    /// Rows with `risk_level = high`
    pub high_count: u64,

    /// Rows with `defect_type != "none"`
    pub defects_found: u64,
}

impl CompanySummary {
    /// The aggregate for a company with no stored rows
    pub fn empty() -> Self {
        Self {
            total_inspections: 0,
            avg_metal_loss: None,
            critical_count: 0,
            high_count: 0,
            defects_found: 0,
        }
    }
}
