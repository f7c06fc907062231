//! Integration test for the sanitisation path: decode, sanitise,
//! store, snapshot

use ironveil::adapters::store::{InspectionStore, MemoryStore};
use ironveil::adapters::table;
use ironveil::config::GatewayConfig;
use ironveil::core::pipeline::write_snapshot;
use ironveil::core::sanitize::Sanitizer;
use ironveil::gateway::QueryGateway;
use std::sync::Arc;

const RAW_CSV: &str = "\
client_name,pipeline_name,inspection_date,inspection_id,inspection_tool,pipeline_segment,girth_weld_location,distance_km,latitude,longitude,wall_thickness_nominal_mm,wall_thickness_actual_mm,metal_loss_mm,metal_loss_percent,defect_type,defect_severity,defect_length_mm,defect_width_mm,defect_depth_mm,operating_pressure_bar,maop_bar,pipe_diameter_mm,pipe_grade,risk_level,failure_probability,recommended_action,next_inspection_months,soil_type,coating_condition,cathodic_protection
Acme Industrial Corp,North Pipeline,2024-03-18,INS-A1B2C3D4,MFL,Segment-12,GW-204,148.22,52.1043,4.2891,14.3,12.7,1.6,11.2,corrosion,medium,34.5,12.0,1.1,61.4,102.0,610,X65,critical,0.0412,immediate_repair,6,clay,good,adequate
Acme Industrial Corp,South Pipeline,2024-04-02,INS-B2C3D4E5,UT,Segment-13,GW-208,152.90,52.2001,4.3550,14.3,13.9,0.4,2.8,none,low,0.0,0.0,0.1,62.0,102.0,610,X65,low,0.0020,monitor,48,clay,good,adequate
Global Energy Solutions,Terminal Alpha,2023-11-02,INS-E5F6A7B8,EMAT,Segment-44,GW-388,301.75,48.7700,-3.5100,21.0,20.4,0.6,2.9,crack,high,14.0,3.0,0.8,44.0,120.0,914,X70,high,0.0310,schedule_inspection,12,subsea,excellent,marginal
";

#[tokio::test]
async fn full_sanitisation_path_preserves_shape_and_hides_names() {
    let raw_records = table::decode_records(RAW_CSV.as_bytes()).unwrap();
    assert_eq!(raw_records.len(), 3);

    let mut sanitizer = Sanitizer::new();
    let clean_records = sanitizer.sanitize(&raw_records);

    // Shape preserved: same row count, same non-name fields, same order
    assert_eq!(clean_records.len(), raw_records.len());
    for (clean, raw) in clean_records.iter().zip(&raw_records) {
        assert_eq!(clean.inspection_id, raw.inspection_id);
        assert_eq!(clean.inspection_date, raw.inspection_date);
        assert_eq!(clean.metal_loss_percent, raw.metal_loss_percent);
        assert_eq!(clean.risk_level, raw.risk_level);
        assert_eq!(clean.pipe_grade, raw.pipe_grade);
    }

    // Deterministic pseudonyms for the fixture names
    assert_eq!(clean_records[0].client_name, "Company_109");
    assert_eq!(clean_records[1].client_name, "Company_109");
    assert_eq!(clean_records[2].client_name, "Company_126");
    assert_eq!(clean_records[0].pipeline_name, "Pipeline_364");

    // No original name appears anywhere in the sanitised table
    let serialized = serde_json::to_string(&clean_records).unwrap();
    assert!(!serialized.contains("Acme"));
    assert!(!serialized.contains("Global Energy"));

    // Store the sanitised table and query it back through the gateway
    let store = Arc::new(MemoryStore::new());
    let stored = store.replace_all(&clean_records).await.unwrap();
    assert_eq!(stored, 3);

    let gateway = QueryGateway::new(store, GatewayConfig::default());
    let critical = gateway
        .query(Some("Company_109"), Some("critical"), None)
        .await
        .unwrap();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].inspection_id, "INS-A1B2C3D4");
}

#[tokio::test]
async fn snapshot_written_after_run_covers_all_mapped_names() {
    let raw_records = table::decode_records(RAW_CSV.as_bytes()).unwrap();

    let mut sanitizer = Sanitizer::new();
    let _ = sanitizer.sanitize(&raw_records);
    let mapping = sanitizer.into_mapping();
    let snapshot = mapping.snapshot(chrono::Utc::now());

    // Two companies + three pipelines
    assert_eq!(snapshot.client_mapping.len(), 5);
    assert_eq!(
        snapshot.client_mapping.get("Acme Industrial Corp").unwrap(),
        "Company_109"
    );
    assert_eq!(
        snapshot.reverse_mapping.get("Pipeline_364").unwrap(),
        "North Pipeline"
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("client_mapping.json");
    write_snapshot(&snapshot, &path).unwrap();

    let persisted: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(persisted["created_at"].is_string());
    assert_eq!(persisted["client_mapping"]["North Pipeline"], "Pipeline_364");
    assert_eq!(
        persisted["reverse_mapping"]["Company_126"],
        "Global Energy Solutions"
    );
}
