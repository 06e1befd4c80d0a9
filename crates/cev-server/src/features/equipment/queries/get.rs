//! Get equipment query

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::types::EquipmentRow;

/// Query for one equipment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEquipmentQuery {
    pub id: Uuid,
}

/// Errors that can occur when fetching equipment
#[derive(Debug, thiserror::Error)]
pub enum GetEquipmentError {
    #[error("Equipment '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<EquipmentRow, GetEquipmentError>> for GetEquipmentQuery {}

impl crate::cqrs::middleware::Query for GetEquipmentQuery {}

/// Handles the get equipment query
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetEquipmentQuery) -> Result<EquipmentRow, GetEquipmentError> {
    sqlx::query_as::<_, EquipmentRow>(
        r#"
        SELECT id, dataset_id, name, equipment_type, material, flowrate, pressure, temperature
        FROM equipment
        WHERE id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetEquipmentError::NotFound(query.id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unknown_equipment_is_not_found(pool: PgPool) {
        let result = handle(pool, GetEquipmentQuery { id: Uuid::new_v4() }).await;
        assert!(matches!(result, Err(GetEquipmentError::NotFound(_))));
    }
}
