//! Integration tests for query gateway semantics over the in-memory store

use chrono::NaiveDate;
use ironveil::adapters::store::{InspectionStore, MemoryStore};
use ironveil::config::GatewayConfig;
use ironveil::domain::{InspectionRecord, IronveilError, RiskLevel};
use ironveil::gateway::QueryGateway;
use std::sync::Arc;

fn record(client: &str, risk: RiskLevel, inspection_id: &str) -> InspectionRecord {
    InspectionRecord {
        client_name: client.to_string(),
        pipeline_name: "Pipeline_364".to_string(),
        inspection_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        inspection_id: inspection_id.to_string(),
        inspection_tool: "MFL".to_string(),
        pipeline_segment: "Segment-7".to_string(),
        girth_weld_location: "GW-101".to_string(),
        distance_km: 42.0,
        latitude: 50.0,
        longitude: 6.0,
        wall_thickness_nominal_mm: 15.0,
        wall_thickness_actual_mm: 13.5,
        metal_loss_mm: 1.5,
        metal_loss_percent: 10.0,
        defect_type: "corrosion".to_string(),
        defect_severity: RiskLevel::Medium,
        defect_length_mm: 20.0,
        defect_width_mm: 8.0,
        defect_depth_mm: 0.9,
        operating_pressure_bar: 60.0,
        maop_bar: 100.0,
        pipe_diameter_mm: 762,
        pipe_grade: "X60".to_string(),
        risk_level: risk,
        failure_probability: 0.02,
        recommended_action: "monitor".to_string(),
        next_inspection_months: 24,
        soil_type: "mixed".to_string(),
        coating_condition: "fair".to_string(),
        cathodic_protection: "adequate".to_string(),
    }
}

fn gateway_with(records: Vec<InspectionRecord>) -> QueryGateway {
    QueryGateway::new(
        Arc::new(MemoryStore::with_records(records)),
        GatewayConfig::default(),
    )
}

#[tokio::test]
async fn limit_caps_results_in_stored_order() {
    // Five critical rows for one company; limit 2 returns exactly the
    // first two in stored order, never more.
    let records: Vec<_> = (1..=5)
        .map(|i| record("Company_007", RiskLevel::Critical, &format!("INS-{i:04}")))
        .collect();
    let gateway = gateway_with(records);

    let results = gateway
        .query(Some("Company_007"), Some("critical"), Some(2))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].inspection_id, "INS-0001");
    assert_eq!(results[1].inspection_id, "INS-0002");
}

#[tokio::test]
async fn filters_combine_with_logical_and() {
    let gateway = gateway_with(vec![
        record("Company_007", RiskLevel::Critical, "INS-A"),
        record("Company_007", RiskLevel::Low, "INS-B"),
        record("Company_126", RiskLevel::Critical, "INS-C"),
    ]);

    let results = gateway
        .query(Some("Company_007"), Some("critical"), None)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].inspection_id, "INS-A");
}

#[tokio::test]
async fn no_filters_matches_all_up_to_default_limit() {
    let records: Vec<_> = (0..25)
        .map(|i| record("Company_007", RiskLevel::Low, &format!("INS-{i:04}")))
        .collect();
    let gateway = gateway_with(records);

    let results = gateway.query(None, None, None).await.unwrap();
    // GatewayConfig::default() keeps the original tool's default of 10
    assert_eq!(results.len(), 10);
}

#[tokio::test]
async fn requested_limit_is_capped_at_max() {
    let records: Vec<_> = (0..30)
        .map(|i| record("Company_007", RiskLevel::Low, &format!("INS-{i:04}")))
        .collect();
    let gateway = QueryGateway::new(
        Arc::new(MemoryStore::with_records(records)),
        GatewayConfig {
            default_limit: 10,
            max_limit: 20,
        },
    );

    let results = gateway.query(None, None, Some(10_000)).await.unwrap();
    assert_eq!(results.len(), 20);
}

#[tokio::test]
async fn invalid_risk_level_is_a_validation_error() {
    let gateway = gateway_with(vec![record("Company_007", RiskLevel::Low, "INS-A")]);

    let err = gateway
        .query(Some("Company_007"), Some("urgent"), None)
        .await
        .unwrap_err();
    match err {
        IronveilError::Validation(message) => {
            assert!(message.contains("Invalid risk level"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn company_summary_aggregates_one_company_only() {
    let mut with_defect = record("Company_007", RiskLevel::Critical, "INS-A");
    with_defect.metal_loss_percent = 20.0;
    let mut clean = record("Company_007", RiskLevel::High, "INS-B");
    clean.defect_type = "none".to_string();
    clean.metal_loss_percent = 10.0;
    let other_company = record("Company_126", RiskLevel::Critical, "INS-C");

    let gateway = gateway_with(vec![with_defect, clean, other_company]);

    let summary = gateway.company_summary("Company_007").await.unwrap();
    assert_eq!(summary.total_inspections, 2);
    assert_eq!(summary.avg_metal_loss, Some(15.0));
    assert_eq!(summary.critical_count, 1);
    assert_eq!(summary.high_count, 1);
    assert_eq!(summary.defects_found, 1);
}

#[tokio::test]
async fn unknown_company_summary_is_zero_aggregate() {
    let gateway = gateway_with(vec![record("Company_007", RiskLevel::Low, "INS-A")]);

    let summary = gateway.company_summary("Company_999").await.unwrap();
    assert_eq!(summary.total_inspections, 0);
    assert_eq!(summary.avg_metal_loss, None);
    assert_eq!(summary.critical_count, 0);
    assert_eq!(summary.defects_found, 0);
}

#[tokio::test]
async fn list_companies_returns_distinct_sorted_pseudonyms() {
    let gateway = gateway_with(vec![
        record("Company_126", RiskLevel::Low, "INS-A"),
        record("Company_007", RiskLevel::Low, "INS-B"),
        record("Company_126", RiskLevel::High, "INS-C"),
    ]);

    let companies = gateway.list_companies().await.unwrap();
    let names: Vec<_> = companies.iter().map(|p| p.as_str()).collect();
    assert_eq!(names, vec!["Company_007", "Company_126"]);
}

#[tokio::test]
async fn store_writes_are_full_replace() {
    let store = Arc::new(MemoryStore::new());
    store
        .replace_all(&[record("Company_007", RiskLevel::Low, "INS-A")])
        .await
        .unwrap();
    store
        .replace_all(&[record("Company_126", RiskLevel::Low, "INS-B")])
        .await
        .unwrap();

    let gateway = QueryGateway::new(store, GatewayConfig::default());
    let companies = gateway.list_companies().await.unwrap();
    let names: Vec<_> = companies.iter().map(|p| p.as_str()).collect();
    // Second run overwrote the first entirely
    assert_eq!(names, vec!["Company_126"]);
}
