//! Delete equipment command

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Command to delete an equipment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEquipmentCommand {
    pub id: Uuid,
}

/// Response from deleting an equipment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEquipmentResponse {
    pub id: Uuid,
}

/// Errors that can occur when deleting equipment
#[derive(Debug, thiserror::Error)]
pub enum DeleteEquipmentError {
    #[error("Equipment '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteEquipmentResponse, DeleteEquipmentError>> for DeleteEquipmentCommand {}

impl crate::cqrs::middleware::Command for DeleteEquipmentCommand {}

/// Handles the delete equipment command
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteEquipmentCommand,
) -> Result<DeleteEquipmentResponse, DeleteEquipmentError> {
    let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteEquipmentError::NotFound(command.id));
    }

    Ok(DeleteEquipmentResponse { id: command.id })
}
