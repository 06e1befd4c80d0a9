//! Get dataset summary query

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::summary;
use super::super::types::{DatasetRecord, DatasetSummary};

/// Query for one dataset's aggregate summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSummaryQuery {
    pub dataset_id: Uuid,
}

/// Errors that can occur when fetching a summary
#[derive(Debug, thiserror::Error)]
pub enum GetSummaryError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DatasetSummary, GetSummaryError>> for GetSummaryQuery {}

impl crate::cqrs::middleware::Query for GetSummaryQuery {}

/// Handles the get summary query
///
/// The summary is recomputed from the dataset's current equipment rows on
/// every call; nothing is cached.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetSummaryQuery,
) -> Result<DatasetSummary, GetSummaryError> {
    let dataset = sqlx::query_as::<_, DatasetRecord>(
        "SELECT id, name, uploaded_at FROM datasets WHERE id = $1",
    )
    .bind(query.dataset_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetSummaryError::NotFound(query.dataset_id))?;

    Ok(summary::summarize(&pool, dataset).await?)
}
