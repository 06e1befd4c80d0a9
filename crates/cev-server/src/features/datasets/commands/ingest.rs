//! Ingest dataset command
//!
//! Turns an uploaded CSV into a new dataset plus its equipment rows.
//! Structural parse failures abort before anything is persisted; row-level
//! defects (unparseable values, database rejections) skip only that row.
//! The dataset itself is never rolled back once created, so an upload whose
//! rows all fail still yields an empty dataset.

use chrono::Utc;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::super::summary;
use super::super::types::{DatasetRecord, DatasetSummary};
use cev_ingest::parser::{parse_equipment_csv, CsvParseError};

/// Command to ingest an uploaded CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestDatasetCommand {
    /// Original filename of the upload, used as the dataset name
    pub filename: Option<String>,
    /// Raw file bytes
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// Response from ingesting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestDatasetResponse {
    /// The created dataset with its freshly computed summary
    pub dataset: DatasetSummary,
    /// Number of equipment rows successfully created (may be zero)
    pub created: i64,
}

/// Errors that can occur when ingesting a dataset
#[derive(Debug, thiserror::Error)]
pub enum IngestDatasetError {
    /// No file content was supplied
    #[error("No file uploaded")]
    FileRequired,
    /// The upload could not be parsed as CSV at all
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] CsvParseError),
    /// A database error occurred outside row-level inserts
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<IngestDatasetResponse, IngestDatasetError>> for IngestDatasetCommand {}

impl crate::cqrs::middleware::Command for IngestDatasetCommand {}

impl IngestDatasetCommand {
    /// Resolve the dataset name: the uploaded filename, or a
    /// timestamp-derived fallback when none is available.
    fn dataset_name(&self) -> String {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("upload-{}", Utc::now().to_rfc3339()))
    }
}

/// Handles the ingest dataset command
///
/// 1. Parses the full upload (structural errors abort here, before any
///    write)
/// 2. Creates the dataset row
/// 3. Inserts each parsed equipment row, skipping individual failures
/// 4. Returns the dataset's summary and the created-row count
///
/// # Errors
///
/// - `FileRequired` - the upload carried no content
/// - `Parse` - the content is not tabular text
/// - `Database` - dataset creation or summary computation failed
#[tracing::instrument(skip(pool, command), fields(filename = ?command.filename))]
pub async fn handle(
    pool: PgPool,
    command: IngestDatasetCommand,
) -> Result<IngestDatasetResponse, IngestDatasetError> {
    if command.content.is_empty() {
        return Err(IngestDatasetError::FileRequired);
    }

    let parsed = parse_equipment_csv(&command.content)?;
    let name = command.dataset_name();

    let dataset = sqlx::query_as::<_, DatasetRecord>(
        "INSERT INTO datasets (name) VALUES ($1) RETURNING id, name, uploaded_at",
    )
    .bind(&name)
    .fetch_one(&pool)
    .await?;

    let mut created = 0i64;
    let mut persist_failures = 0usize;

    for fields in parsed.valid() {
        let result = sqlx::query(
            r#"
            INSERT INTO equipment
                (dataset_id, name, equipment_type, material, flowrate, pressure, temperature)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(dataset.id)
        .bind(&fields.name)
        .bind(&fields.equipment_type)
        .bind(&fields.material)
        .bind(fields.flowrate)
        .bind(fields.pressure)
        .bind(fields.temperature)
        .execute(&pool)
        .await;

        match result {
            Ok(_) => created += 1,
            Err(error) => {
                // Row-level database rejections (e.g. over-length values)
                // are local: skip the row and keep going.
                persist_failures += 1;
                tracing::warn!(row_name = %fields.name, %error, "Skipping row that failed to persist");
            },
        }
    }

    tracing::info!(
        dataset_id = %dataset.id,
        dataset_name = %dataset.name,
        created,
        skipped = parsed.skipped() + persist_failures,
        "Dataset ingested"
    );

    let dataset = summary::summarize(&pool, dataset).await?;

    Ok(IngestDatasetResponse { dataset, created })
}
