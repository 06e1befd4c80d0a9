//! List recent datasets query
//!
//! Returns the five most recently uploaded datasets, newest first, each
//! with a freshly computed aggregate summary.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::super::summary;
use super::super::types::{DatasetRecord, DatasetSummary};

/// Maximum number of datasets returned by the recent listing.
pub const RECENT_DATASET_LIMIT: i64 = 5;

/// Query for the recent dataset listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecentDatasetsQuery {}

/// Errors that can occur when listing recent datasets
#[derive(Debug, thiserror::Error)]
pub enum ListRecentDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<DatasetSummary>, ListRecentDatasetsError>> for ListRecentDatasetsQuery {}

impl crate::cqrs::middleware::Query for ListRecentDatasetsQuery {}

/// Handles the list recent datasets query
///
/// Ordering is upload time descending with the id as tie-break, so a batch
/// of datasets sharing one timestamp still lists consistently within a
/// call.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    _query: ListRecentDatasetsQuery,
) -> Result<Vec<DatasetSummary>, ListRecentDatasetsError> {
    let datasets = sqlx::query_as::<_, DatasetRecord>(
        r#"
        SELECT id, name, uploaded_at
        FROM datasets
        ORDER BY uploaded_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_DATASET_LIMIT)
    .fetch_all(&pool)
    .await?;

    let mut summaries = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        summaries.push(summary::summarize(&pool, dataset).await?);
    }

    Ok(summaries)
}
