//! Tabular codec for the raw inspection file
//!
//! Decodes the downloaded CSV into typed [`InspectionRecord`] rows and
//! encodes rows back to CSV (used by the `seed` fixture generator). A
//! malformed row fails the whole decode: the run is all-or-nothing.

use crate::domain::record::InspectionRecord;
use crate::domain::result::Result;

/// Decodes a CSV byte buffer into inspection records
///
/// The header row is required and matched by name, not position.
///
/// # Errors
///
/// Returns a serialization error on a missing header, a missing
/// column, or an unparseable value in any row.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<InspectionRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: InspectionRecord = row?;
        records.push(record);
    }
    tracing::info!(records = records.len(), "Decoded raw inspection table");
    Ok(records)
}

/// Encodes inspection records as CSV with a header row
pub fn encode_records(records: &[InspectionRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::domain::IronveilError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    const SAMPLE_CSV: &str = "\
client_name,pipeline_name,inspection_date,inspection_id,inspection_tool,pipeline_segment,girth_weld_location,distance_km,latitude,longitude,wall_thickness_nominal_mm,wall_thickness_actual_mm,metal_loss_mm,metal_loss_percent,defect_type,defect_severity,defect_length_mm,defect_width_mm,defect_depth_mm,operating_pressure_bar,maop_bar,pipe_diameter_mm,pipe_grade,risk_level,failure_probability,recommended_action,next_inspection_months,soil_type,coating_condition,cathodic_protection
Acme Industrial Corp,North Pipeline,2024-03-18,INS-A1B2C3D4,MFL,Segment-12,GW-204,148.22,52.1043,4.2891,14.3,12.7,1.6,11.2,corrosion,medium,34.5,12.0,1.1,61.4,102.0,610,X65,high,0.0412,schedule_inspection,18,clay,good,adequate
Global Energy Solutions,Terminal Alpha,2023-11-02,INS-E5F6A7B8,UT,Segment-44,GW-388,301.75,48.77,-3.51,21.0,20.4,0.6,2.9,none,low,0.0,0.0,0.2,44.0,120.0,914,X70,low,0.0031,none,48,subsea,excellent,marginal
";

    #[test]
    fn test_decode_typed_rows() {
        let records = decode_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].client_name, "Acme Industrial Corp");
        assert_eq!(records[0].risk_level, RiskLevel::High);
        assert_eq!(records[0].pipe_diameter_mm, 610);
        assert_eq!(records[1].defect_type, "none");
        assert_eq!(records[1].metal_loss_percent, 2.9);
    }

    #[test]
    fn test_decode_rejects_bad_enum_value() {
        let bad = SAMPLE_CSV.replace(",high,", ",severe,");
        assert!(decode_records(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_column() {
        let truncated = "client_name,pipeline_name\nAcme,North\n";
        assert!(decode_records(truncated.as_bytes()).is_err());
    }

    #[test]
    fn test_encode_emits_header() {
        let records = decode_records(SAMPLE_CSV.as_bytes()).unwrap();
        let bytes = encode_records(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("client_name,pipeline_name,inspection_date"));
        assert!(text.contains("Acme Industrial Corp"));
    }
}
