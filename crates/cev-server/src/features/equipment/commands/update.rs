//! Update equipment command
//!
//! Full-record update of one equipment row. The owning dataset reference is
//! immutable and not part of the command.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::types::EquipmentRow;
use crate::features::shared::validation::{validate_label, validate_name, NameValidationError};

/// Command to update an equipment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEquipmentCommand {
    /// Set from the request path, not the body
    #[serde(skip)]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub equipment_type: String,
    #[serde(default)]
    pub material: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Errors that can occur when updating equipment
#[derive(Debug, thiserror::Error)]
pub enum UpdateEquipmentError {
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),
    #[error("Equipment '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<EquipmentRow, UpdateEquipmentError>> for UpdateEquipmentCommand {}

impl crate::cqrs::middleware::Command for UpdateEquipmentCommand {}

impl UpdateEquipmentCommand {
    /// Validates the command parameters
    pub fn validate(&self) -> Result<(), UpdateEquipmentError> {
        validate_name(&self.name, 100)?;
        validate_label(&self.equipment_type, 100)?;
        validate_label(&self.material, 100)?;
        Ok(())
    }
}

/// Handles the update equipment command
#[tracing::instrument(skip(pool, command), fields(id = %command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateEquipmentCommand,
) -> Result<EquipmentRow, UpdateEquipmentError> {
    command.validate()?;

    sqlx::query_as::<_, EquipmentRow>(
        r#"
        UPDATE equipment
        SET name = $2,
            equipment_type = $3,
            material = $4,
            flowrate = $5,
            pressure = $6,
            temperature = $7
        WHERE id = $1
        RETURNING id, dataset_id, name, equipment_type, material, flowrate, pressure, temperature
        "#,
    )
    .bind(command.id)
    .bind(&command.name)
    .bind(&command.equipment_type)
    .bind(&command.material)
    .bind(command.flowrate)
    .bind(command.pressure)
    .bind(command.temperature)
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateEquipmentError::NotFound(command.id))
}
