//! Get dataset report query
//!
//! Produces the PDF report for one dataset, or the distinct
//! capability-unavailable error when the renderer has no fonts.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::summary;
use super::super::types::DatasetRecord;
use crate::report::{ReportError, ReportRenderer};
use cev_common::EquipmentFields;

/// Query for a dataset's PDF report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetReportQuery {
    pub dataset_id: Uuid,
}

impl crate::cqrs::middleware::Query for GetReportQuery {}

/// Errors that can occur when building a report
#[derive(Debug, thiserror::Error)]
pub enum GetReportError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),
    /// Rendering capability absent in this runtime. Recoverable; not
    /// conflated with NotFound.
    #[error("PDF generation not available")]
    Unavailable,
    #[error("Report rendering failed: {0}")]
    Render(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ReportError> for GetReportError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Unavailable => GetReportError::Unavailable,
            ReportError::Render(msg) => GetReportError::Render(msg),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EquipmentReportRow {
    name: String,
    equipment_type: String,
    material: String,
    flowrate: f64,
    pressure: f64,
    temperature: f64,
}

/// Handles the get report query
#[tracing::instrument(skip(pool, renderer))]
pub async fn handle(
    pool: PgPool,
    renderer: ReportRenderer,
    query: GetReportQuery,
) -> Result<Vec<u8>, GetReportError> {
    let dataset = sqlx::query_as::<_, DatasetRecord>(
        "SELECT id, name, uploaded_at FROM datasets WHERE id = $1",
    )
    .bind(query.dataset_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetReportError::NotFound(query.dataset_id))?;

    // Check availability before touching equipment rows, so the
    // unavailable case stays cheap.
    if !renderer.is_available() {
        return Err(GetReportError::Unavailable);
    }

    let summary = summary::summarize(&pool, dataset).await?;

    let rows = sqlx::query_as::<_, EquipmentReportRow>(
        r#"
        SELECT name, equipment_type, material, flowrate, pressure, temperature
        FROM equipment
        WHERE dataset_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(query.dataset_id)
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

    let pdf = renderer.render(&summary, &fields)?;

    tracing::debug!(
        dataset_id = %summary.id,
        bytes = pdf.len(),
        "Report rendered"
    );

    Ok(pdf)
}
