//! Create equipment command
//!
//! Adds a single equipment row to an existing dataset, outside the bulk
//! CSV ingestion path.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::types::EquipmentRow;
use crate::features::shared::validation::{validate_label, validate_name, NameValidationError};

/// Command to create an equipment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEquipmentCommand {
    pub dataset_id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub equipment_type: String,
    #[serde(default)]
    pub material: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Errors that can occur when creating equipment
#[derive(Debug, thiserror::Error)]
pub enum CreateEquipmentError {
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),
    #[error("Dataset '{0}' not found")]
    DatasetNotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<EquipmentRow, CreateEquipmentError>> for CreateEquipmentCommand {}

impl crate::cqrs::middleware::Command for CreateEquipmentCommand {}

impl CreateEquipmentCommand {
    /// Validates the command parameters
    pub fn validate(&self) -> Result<(), CreateEquipmentError> {
        validate_name(&self.name, 100)?;
        validate_label(&self.equipment_type, 100)?;
        validate_label(&self.material, 100)?;
        Ok(())
    }
}

/// Handles the create equipment command
#[tracing::instrument(skip(pool, command), fields(dataset_id = %command.dataset_id, name = %command.name))]
pub async fn handle(
    pool: PgPool,
    command: CreateEquipmentCommand,
) -> Result<EquipmentRow, CreateEquipmentError> {
    command.validate()?;

    let dataset_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM datasets WHERE id = $1)")
            .bind(command.dataset_id)
            .fetch_one(&pool)
            .await?;

    if !dataset_exists {
        return Err(CreateEquipmentError::DatasetNotFound(command.dataset_id));
    }

    let row = sqlx::query_as::<_, EquipmentRow>(
        r#"
        INSERT INTO equipment
            (dataset_id, name, equipment_type, material, flowrate, pressure, temperature)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, dataset_id, name, equipment_type, material, flowrate, pressure, temperature
        "#,
    )
    .bind(command.dataset_id)
    .bind(&command.name)
    .bind(&command.equipment_type)
    .bind(&command.material)
    .bind(command.flowrate)
    .bind(command.pressure)
    .bind(command.temperature)
    .fetch_one(&pool)
    .await?;

    Ok(row)
}
