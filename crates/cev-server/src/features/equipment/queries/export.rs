//! Export equipment query
//!
//! Streams matching equipment rows as a CSV download with the fixed
//! six-column header. Accepts the same filter surface the original export
//! endpoint had: name search, exact material, and minimum pressure and
//! temperature thresholds.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use cev_common::EquipmentFields;
use cev_ingest::write_equipment_csv;

/// Query to export equipment rows as CSV
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportEquipmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<f64>,
}

/// Errors that can occur when exporting equipment
#[derive(Debug, thiserror::Error)]
pub enum ExportEquipmentError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<u8>, ExportEquipmentError>> for ExportEquipmentQuery {}

impl crate::cqrs::middleware::Query for ExportEquipmentQuery {}

#[derive(Debug, sqlx::FromRow)]
struct ExportRow {
    name: String,
    equipment_type: String,
    material: String,
    flowrate: f64,
    pressure: f64,
    temperature: f64,
}

/// Handles the export equipment query
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ExportEquipmentQuery,
) -> Result<Vec<u8>, ExportEquipmentError> {
    let rows = sqlx::query_as::<_, ExportRow>(
        r#"
        SELECT name, equipment_type, material, flowrate, pressure, temperature
        FROM equipment
        WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
          AND ($2::TEXT IS NULL OR material = $2)
          AND ($3::DOUBLE PRECISION IS NULL OR pressure >= $3)
          AND ($4::DOUBLE PRECISION IS NULL OR temperature >= $4)
        ORDER BY id ASC
        "#,
    )
    .bind(query.search.as_deref())
    .bind(query.material.as_deref())
    .bind(query.min_pressure)
    .bind(query.min_temperature)
    .fetch_all(&pool)
    .await?;

    let fields: Vec<EquipmentFields> = rows
        .into_iter()
        .map(|r| EquipmentFields {
            name: r.name,
            equipment_type: r.equipment_type,
            material: r.material,
            flowrate: r.flowrate,
            pressure: r.pressure,
            temperature: r.temperature,
        })
        .collect();

    tracing::debug!(rows = fields.len(), "Equipment exported");

    Ok(write_equipment_csv(&fields)?)
}
