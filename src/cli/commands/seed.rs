//! Seed command implementation
//!
//! Generates a synthetic raw inspection CSV for local development and
//! testing. The company and pipeline names are deliberately realistic:
//! the fixture exists to exercise the sanitisation path.

use crate::adapters::table;
use crate::domain::pseudonym::RiskLevel;
use crate::domain::record::InspectionRecord;
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Number of records to generate
    #[arg(short, long, default_value_t = 100)]
    pub records: usize,

    /// Output CSV path
    #[arg(short, long, default_value = "data/raw_inspection_data.csv")]
    pub output: String,
}

const COMPANIES: &[(&str, &[&str])] = &[
    (
        "Acme Industrial Corp",
        &["North Pipeline", "South Pipeline", "East Pipeline"],
    ),
    (
        "Global Energy Solutions",
        &["Offshore Platform A", "Offshore Platform B", "Terminal Alpha"],
    ),
    (
        "TechFlow Industries",
        &["Main Distribution Line", "Secondary Route", "Backup System"],
    ),
    (
        "Premier Oil & Gas",
        &["Continental Pipeline", "Regional Network", "Export Terminal"],
    ),
    (
        "United Manufacturing",
        &["Production Line 1", "Production Line 2", "Quality Check System"],
    ),
];

const TOOLS: &[&str] = &["EMAT", "MFL", "UT", "Caliper", "Combo"];
const DEFECT_TYPES: &[&str] = &[
    "corrosion",
    "crack",
    "dent",
    "weld_anomaly",
    "coating_defect",
    "none",
];
const ACTIONS: &[&str] = &["monitor", "schedule_inspection", "immediate_repair", "none"];
const SOIL_TYPES: &[&str] = &["clay", "sand", "rock", "mixed", "subsea"];
const COATING: &[&str] = &["excellent", "good", "fair", "poor", "failed"];
const CATHODIC: &[&str] = &["adequate", "marginal", "inadequate", "none"];
const DIAMETERS: &[i32] = &[508, 610, 762, 914, 1067];
const GRADES: &[&str] = &["X52", "X60", "X65", "X70", "X80"];

impl SeedArgs {
    /// Execute the seed command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(records = self.records, output = %self.output, "Generating fixture data");

        let records = generate_records(self.records);
        let bytes = table::encode_records(&records)?;

        if let Some(parent) = Path::new(&self.output).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.output, bytes)?;

        let critical = records
            .iter()
            .filter(|r| r.risk_level == RiskLevel::Critical)
            .count();
        let avg_loss = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.metal_loss_percent).sum::<f64>() / records.len() as f64
        };

        println!("Generated {} inspection records: {}", records.len(), self.output);
        println!("  Companies:         {}", COMPANIES.len());
        println!("  Critical findings: {critical}");
        println!("  Avg metal loss:    {avg_loss:.1}%");
        Ok(0)
    }
}

/// Generates synthetic inspection records
pub fn generate_records(count: usize) -> Vec<InspectionRecord> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    (0..count)
        .map(|_| {
            let (company, pipelines) = COMPANIES
                .choose(&mut rng)
                .expect("company fixture list is non-empty");
            let pipeline = pipelines
                .choose(&mut rng)
                .expect("pipeline fixture list is non-empty");

            let nominal: f64 = round2(rng.gen_range(10.0..27.0));
            let actual: f64 = round2(nominal - rng.gen_range(0.0..8.0));
            let loss_mm = round2(nominal - actual);
            let loss_percent = round1(loss_mm / nominal * 100.0);

            let has_defect = rng.gen_bool(0.7);

            InspectionRecord {
                client_name: (*company).to_string(),
                pipeline_name: (*pipeline).to_string(),
                inspection_date: random_date(&mut rng, today),
                inspection_id: format!(
                    "INS-{}",
                    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
                ),
                inspection_tool: pick(&mut rng, TOOLS),
                pipeline_segment: format!("Segment-{}", rng.gen_range(1..=50)),
                girth_weld_location: format!("GW-{}", rng.gen_range(1..=500)),
                distance_km: round2(rng.gen_range(0.5..500.0)),
                latitude: round6(rng.gen_range(25.0..65.0)),
                longitude: round6(rng.gen_range(-120.0..60.0)),
                wall_thickness_nominal_mm: nominal,
                wall_thickness_actual_mm: actual,
                metal_loss_mm: loss_mm,
                metal_loss_percent: loss_percent,
                defect_type: pick(&mut rng, DEFECT_TYPES),
                defect_severity: random_risk(&mut rng),
                defect_length_mm: if has_defect {
                    round1(rng.gen_range(0.0..200.0))
                } else {
                    0.0
                },
                defect_width_mm: if has_defect {
                    round1(rng.gen_range(0.0..100.0))
                } else {
                    0.0
                },
                defect_depth_mm: round2(rng.gen_range(0.0..5.0)),
                operating_pressure_bar: round1(rng.gen_range(20.0..100.0)),
                maop_bar: round1(rng.gen_range(80.0..150.0)),
                pipe_diameter_mm: *DIAMETERS
                    .choose(&mut rng)
                    .expect("diameter fixture list is non-empty"),
                pipe_grade: pick(&mut rng, GRADES),
                risk_level: random_risk(&mut rng),
                failure_probability: round4(rng.gen_range(0.001..0.5)),
                recommended_action: pick(&mut rng, ACTIONS),
                next_inspection_months: rng.gen_range(6..=60),
                soil_type: pick(&mut rng, SOIL_TYPES),
                coating_condition: pick(&mut rng, COATING),
                cathodic_protection: pick(&mut rng, CATHODIC),
            }
        })
        .collect()
}

fn pick(rng: &mut impl Rng, values: &[&str]) -> String {
    values
        .choose(rng)
        .expect("fixture list is non-empty")
        .to_string()
}

fn random_risk(rng: &mut impl Rng) -> RiskLevel {
    *RiskLevel::all()
        .choose(rng)
        .expect("risk levels are non-empty")
}

fn random_date(rng: &mut impl Rng, today: NaiveDate) -> NaiveDate {
    today - Duration::days(rng.gen_range(0..730))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_records_decode_cleanly() {
        let records = generate_records(25);
        assert_eq!(records.len(), 25);

        let bytes = table::encode_records(&records).unwrap();
        let back = table::decode_records(&bytes).unwrap();
        assert_eq!(back.len(), 25);
    }

    #[test]
    fn test_generated_names_come_from_fixture() {
        let records = generate_records(50);
        for record in &records {
            assert!(COMPANIES.iter().any(|(c, _)| *c == record.client_name));
        }
    }
}
