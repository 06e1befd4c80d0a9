//! Delete dataset command
//!
//! Removes a dataset; its equipment rows go with it via the foreign-key
//! cascade.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Command to delete a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetCommand {
    pub id: Uuid,
}

/// Response from deleting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetResponse {
    pub id: Uuid,
}

/// Errors that can occur when deleting a dataset
#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteDatasetResponse, DeleteDatasetError>> for DeleteDatasetCommand {}

impl crate::cqrs::middleware::Command for DeleteDatasetCommand {}

/// Handles the delete dataset command
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let result = sqlx::query("DELETE FROM datasets WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteDatasetError::NotFound(command.id));
    }

    Ok(DeleteDatasetResponse { id: command.id })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::datasets::types::DatasetRecord;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_cascades_to_equipment(pool: PgPool) {
        let dataset = sqlx::query_as::<_, DatasetRecord>(
            "INSERT INTO datasets (name) VALUES ('doomed.csv') RETURNING id, name, uploaded_at",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            INSERT INTO equipment
                (dataset_id, name, equipment_type, material, flowrate, pressure, temperature)
            VALUES ($1, 'Pump-1', 'Pump', '', 1, 1, 1)
            "#,
        )
        .bind(dataset.id)
        .execute(&pool)
        .await
        .unwrap();

        let response = handle(pool.clone(), DeleteDatasetCommand { id: dataset.id })
            .await
            .unwrap();
        assert_eq!(response.id, dataset.id);

        let equipment: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(equipment, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_unknown_dataset_is_not_found(pool: PgPool) {
        let result = handle(pool, DeleteDatasetCommand { id: Uuid::new_v4() }).await;
        assert!(matches!(result, Err(DeleteDatasetError::NotFound(_))));
    }
}
