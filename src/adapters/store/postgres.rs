//! PostgreSQL store implementation
//!
//! Pooled client for the sanitised store. Full-replace writes run in a
//! single transaction so readers never observe a partial table.

use crate::adapters::store::traits::InspectionStore;
use crate::config::schema::StorageConfig;
use crate::domain::errors::StoreError;
use crate::domain::record::{CompanySummary, InspectionRecord, QueryFilter};
use crate::domain::result::Result;
use crate::domain::{Pseudonym, RiskLevel};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::str::FromStr;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// Pooled PostgreSQL-backed inspection store
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Creates a store from storage configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built.
    pub fn connect(config: &StorageConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                StoreError::ConnectionFailed(format!("Invalid connection string: {e}"))
            })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| {
                StoreError::ConnectionFailed(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self { pool })
    }

    /// Test the connection with a trivial query
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StoreError::ConnectionFailed(format!("Connection test failed: {e}")))?;
        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            StoreError::ConnectionFailed(format!("Failed to get connection from pool: {e}")).into()
        })
    }
}

const INSERT_SQL: &str = "INSERT INTO inspection_records (
        client_name, pipeline_name, inspection_date, inspection_id, inspection_tool,
        pipeline_segment, girth_weld_location, distance_km, latitude, longitude,
        wall_thickness_nominal_mm, wall_thickness_actual_mm, metal_loss_mm, metal_loss_percent,
        defect_type, defect_severity, defect_length_mm, defect_width_mm, defect_depth_mm,
        operating_pressure_bar, maop_bar, pipe_diameter_mm, pipe_grade,
        risk_level, failure_probability, recommended_action, next_inspection_months,
        soil_type, coating_condition, cathodic_protection
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
        $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
        $21, $22, $23, $24, $25, $26, $27, $28, $29, $30
    )";

const SELECT_COLUMNS: &str = "client_name, pipeline_name, inspection_date, inspection_id, \
    inspection_tool, pipeline_segment, girth_weld_location, distance_km, latitude, longitude, \
    wall_thickness_nominal_mm, wall_thickness_actual_mm, metal_loss_mm, metal_loss_percent, \
    defect_type, defect_severity, defect_length_mm, defect_width_mm, defect_depth_mm, \
    operating_pressure_bar, maop_bar, pipe_diameter_mm, pipe_grade, risk_level, \
    failure_probability, recommended_action, next_inspection_months, soil_type, \
    coating_condition, cathodic_protection";

fn row_to_record(row: &Row) -> Result<InspectionRecord> {
    let severity: String = row
        .try_get("defect_severity")
        .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
    let risk: String = row
        .try_get("risk_level")
        .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;

    let get_text = |name: &str| -> Result<String> {
        row.try_get(name)
            .map_err(|e| StoreError::RowDecodeFailed(format!("{name}: {e}")).into())
    };
    let get_f64 = |name: &str| -> Result<f64> {
        row.try_get(name)
            .map_err(|e| StoreError::RowDecodeFailed(format!("{name}: {e}")).into())
    };
    let get_i32 = |name: &str| -> Result<i32> {
        row.try_get(name)
            .map_err(|e| StoreError::RowDecodeFailed(format!("{name}: {e}")).into())
    };

    Ok(InspectionRecord {
        client_name: get_text("client_name")?,
        pipeline_name: get_text("pipeline_name")?,
        inspection_date: row
            .try_get("inspection_date")
            .map_err(|e| StoreError::RowDecodeFailed(format!("inspection_date: {e}")))?,
        inspection_id: get_text("inspection_id")?,
        inspection_tool: get_text("inspection_tool")?,
        pipeline_segment: get_text("pipeline_segment")?,
        girth_weld_location: get_text("girth_weld_location")?,
        distance_km: get_f64("distance_km")?,
        latitude: get_f64("latitude")?,
        longitude: get_f64("longitude")?,
        wall_thickness_nominal_mm: get_f64("wall_thickness_nominal_mm")?,
        wall_thickness_actual_mm: get_f64("wall_thickness_actual_mm")?,
        metal_loss_mm: get_f64("metal_loss_mm")?,
        metal_loss_percent: get_f64("metal_loss_percent")?,
        defect_type: get_text("defect_type")?,
        defect_severity: RiskLevel::from_str(&severity)
            .map_err(StoreError::RowDecodeFailed)?,
        defect_length_mm: get_f64("defect_length_mm")?,
        defect_width_mm: get_f64("defect_width_mm")?,
        defect_depth_mm: get_f64("defect_depth_mm")?,
        operating_pressure_bar: get_f64("operating_pressure_bar")?,
        maop_bar: get_f64("maop_bar")?,
        pipe_diameter_mm: get_i32("pipe_diameter_mm")?,
        pipe_grade: get_text("pipe_grade")?,
        risk_level: RiskLevel::from_str(&risk).map_err(StoreError::RowDecodeFailed)?,
        failure_probability: get_f64("failure_probability")?,
        recommended_action: get_text("recommended_action")?,
        next_inspection_months: get_i32("next_inspection_months")?,
        soil_type: get_text("soil_type")?,
        coating_condition: get_text("coating_condition")?,
        cathodic_protection: get_text("cathodic_protection")?,
    })
}

#[async_trait]
impl InspectionStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;
        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");
        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| StoreError::SchemaFailed(e.to_string()))?;
        tracing::info!("PostgreSQL schema initialized");
        Ok(())
    }

    async fn replace_all(&self, records: &[InspectionRecord]) -> Result<usize> {
        let mut client = self.get_connection().await?;
        let tx = client
            .transaction()
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        tx.execute("TRUNCATE TABLE inspection_records", &[])
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let stmt = tx
            .prepare(INSERT_SQL)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        for record in records {
            tx.execute(
                &stmt,
                &[
                    &record.client_name,
                    &record.pipeline_name,
                    &record.inspection_date,
                    &record.inspection_id,
                    &record.inspection_tool,
                    &record.pipeline_segment,
                    &record.girth_weld_location,
                    &record.distance_km,
                    &record.latitude,
                    &record.longitude,
                    &record.wall_thickness_nominal_mm,
                    &record.wall_thickness_actual_mm,
                    &record.metal_loss_mm,
                    &record.metal_loss_percent,
                    &record.defect_type,
                    &record.defect_severity.as_str(),
                    &record.defect_length_mm,
                    &record.defect_width_mm,
                    &record.defect_depth_mm,
                    &record.operating_pressure_bar,
                    &record.maop_bar,
                    &record.pipe_diameter_mm,
                    &record.pipe_grade,
                    &record.risk_level.as_str(),
                    &record.failure_probability,
                    &record.recommended_action,
                    &record.next_inspection_months,
                    &record.soil_type,
                    &record.coating_condition,
                    &record.cathodic_protection,
                ],
            )
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        tracing::info!(records = records.len(), "Replaced sanitised store contents");
        Ok(records.len())
    }

    async fn query(&self, filter: &QueryFilter) -> Result<Vec<InspectionRecord>> {
        let client = self.get_connection().await?;

        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM inspection_records WHERE 1=1");
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        let company_id = filter.company_id.as_ref().map(|p| p.as_str().to_string());
        if let Some(ref id) = company_id {
            params.push(id);
            sql.push_str(&format!(" AND client_name = ${}", params.len()));
        }

        let risk = filter.risk_level.map(|l| l.as_str().to_string());
        if let Some(ref level) = risk {
            params.push(level);
            sql.push_str(&format!(" AND risk_level = ${}", params.len()));
        }

        let limit = filter.limit as i64;
        params.push(&limit);
        sql.push_str(&format!(" ORDER BY id LIMIT ${}", params.len()));

        let rows = client
            .query(&sql, &params)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn company_summary(&self, company_id: &Pseudonym) -> Result<CompanySummary> {
        let client = self.get_connection().await?;

        let row = client
            .query_one(
                "SELECT
                    COUNT(*) AS total_inspections,
                    AVG(metal_loss_percent) AS avg_metal_loss,
                    COUNT(*) FILTER (WHERE risk_level = 'critical') AS critical_count,
                    COUNT(*) FILTER (WHERE risk_level = 'high') AS high_count,
                    COUNT(*) FILTER (WHERE defect_type != 'none') AS defects_found
                 FROM inspection_records
                 WHERE client_name = $1",
                &[&company_id.as_str()],
            )
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let total: i64 = row
            .try_get("total_inspections")
            .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
        let avg: Option<f64> = row
            .try_get("avg_metal_loss")
            .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
        let critical: i64 = row
            .try_get("critical_count")
            .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
        let high: i64 = row
            .try_get("high_count")
            .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
        let defects: i64 = row
            .try_get("defects_found")
            .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;

        Ok(CompanySummary {
            total_inspections: total as u64,
            avg_metal_loss: avg,
            critical_count: critical as u64,
            high_count: high as u64,
            defects_found: defects as u64,
        })
    }

    async fn list_companies(&self) -> Result<Vec<Pseudonym>> {
        let client = self.get_connection().await?;
        let rows = client
            .query(
                "SELECT DISTINCT client_name FROM inspection_records ORDER BY client_name",
                &[],
            )
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let name: String = row
                    .try_get("client_name")
                    .map_err(|e| StoreError::RowDecodeFailed(e.to_string()))?;
                Pseudonym::new(name)
                    .map_err(|e| StoreError::RowDecodeFailed(e).into())
            })
            .collect()
    }
}
