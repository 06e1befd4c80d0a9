//! List equipment query
//!
//! Paginated listing with the filter surface the clients use: name search,
//! exact material and type, owning dataset, and minimum pressure and
//! temperature thresholds. Ordering is restricted to a whitelist of sortable
//! columns.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::types::EquipmentRow;
use crate::features::shared::pagination::{PaginationMetadata, PaginationParams};

/// Sortable columns, as exposed in the `ordering` parameter.
const ORDERABLE_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("type", "equipment_type"),
    ("material", "material"),
    ("flowrate", "flowrate"),
    ("pressure", "pressure"),
    ("temperature", "temperature"),
];

/// Query to list equipment with pagination and filtering
///
/// Pagination fields are inlined rather than flattened: query-string
/// deserialization cannot handle numeric fields behind `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEquipmentQuery {
    /// Page number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    /// Case-insensitive substring match on the equipment name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact material match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Exact type match
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    /// Restrict to one dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<Uuid>,
    /// Minimum pressure (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pressure: Option<f64>,
    /// Minimum temperature (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<f64>,
    /// Sort column, optionally prefixed with `-` for descending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

/// Response containing a page of equipment rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEquipmentResponse {
    pub items: Vec<EquipmentRow>,
    pub pagination: PaginationMetadata,
}

/// Errors that can occur when listing equipment
#[derive(Debug, thiserror::Error)]
pub enum ListEquipmentError {
    #[error("Page must be greater than 0")]
    InvalidPage,
    #[error("Per page must be between 1 and 100")]
    InvalidPerPage,
    #[error("Cannot order by '{0}'")]
    InvalidOrdering(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListEquipmentResponse, ListEquipmentError>> for ListEquipmentQuery {}

impl crate::cqrs::middleware::Query for ListEquipmentQuery {}

impl ListEquipmentQuery {
    /// Pagination parameters built from the inlined fields
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    /// Validates the query parameters
    pub fn validate(&self) -> Result<(), ListEquipmentError> {
        self.pagination().validate().map_err(|msg| match msg {
            "Page must be greater than 0" => ListEquipmentError::InvalidPage,
            _ => ListEquipmentError::InvalidPerPage,
        })?;

        self.order_clause()?;

        Ok(())
    }

    /// Resolve the ORDER BY clause from the whitelist.
    ///
    /// Only whitelisted column names ever reach the SQL string; anything
    /// else is rejected before the query is built.
    fn order_clause(&self) -> Result<(String, String), ListEquipmentError> {
        let Some(raw) = self.ordering.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(("id".to_string(), "ASC".to_string()));
        };

        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, "DESC"),
            None => (raw, "ASC"),
        };

        ORDERABLE_COLUMNS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| (column.to_string(), direction.to_string()))
            .ok_or_else(|| ListEquipmentError::InvalidOrdering(raw.to_string()))
    }
}

/// Handles the list equipment query
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListEquipmentQuery,
) -> Result<ListEquipmentResponse, ListEquipmentError> {
    query.validate()?;

    let (order_column, order_direction) = query.order_clause()?;
    let pagination = query.pagination();
    let page = pagination.page();
    let per_page = pagination.per_page();
    let offset = pagination.offset();

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM equipment
        WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
          AND ($2::TEXT IS NULL OR material = $2)
          AND ($3::TEXT IS NULL OR equipment_type = $3)
          AND ($4::UUID IS NULL OR dataset_id = $4)
          AND ($5::DOUBLE PRECISION IS NULL OR pressure >= $5)
          AND ($6::DOUBLE PRECISION IS NULL OR temperature >= $6)
        "#,
    )
    .bind(query.search.as_deref())
    .bind(query.material.as_deref())
    .bind(query.equipment_type.as_deref())
    .bind(query.dataset_id)
    .bind(query.min_pressure)
    .bind(query.min_temperature)
    .fetch_one(&pool)
    .await?;

    // ORDER BY cannot be bound as a parameter; the column and direction come
    // from the whitelist above.
    let sql = format!(
        r#"
        SELECT id, dataset_id, name, equipment_type, material, flowrate, pressure, temperature
        FROM equipment
        WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
          AND ($2::TEXT IS NULL OR material = $2)
          AND ($3::TEXT IS NULL OR equipment_type = $3)
          AND ($4::UUID IS NULL OR dataset_id = $4)
          AND ($5::DOUBLE PRECISION IS NULL OR pressure >= $5)
          AND ($6::DOUBLE PRECISION IS NULL OR temperature >= $6)
        ORDER BY {} {}
        LIMIT $7
        OFFSET $8
        "#,
        order_column, order_direction
    );

    let items = sqlx::query_as::<_, EquipmentRow>(&sql)
        .bind(query.search.as_deref())
        .bind(query.material.as_deref())
        .bind(query.equipment_type.as_deref())
        .bind(query.dataset_id)
        .bind(query.min_pressure)
        .bind(query.min_temperature)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&pool)
        .await?;

    Ok(ListEquipmentResponse {
        items,
        pagination: PaginationMetadata::new(page, per_page, total),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ordering_is_id_asc() {
        let query = ListEquipmentQuery::default();
        assert_eq!(
            query.order_clause().unwrap(),
            ("id".to_string(), "ASC".to_string())
        );
    }

    #[test]
    fn test_descending_ordering() {
        let query = ListEquipmentQuery {
            ordering: Some("-pressure".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.order_clause().unwrap(),
            ("pressure".to_string(), "DESC".to_string())
        );
    }

    #[test]
    fn test_type_orders_by_equipment_type_column() {
        let query = ListEquipmentQuery {
            ordering: Some("type".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.order_clause().unwrap(),
            ("equipment_type".to_string(), "ASC".to_string())
        );
    }

    #[test]
    fn test_unknown_ordering_is_rejected() {
        let query = ListEquipmentQuery {
            ordering: Some("id; DROP TABLE equipment".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.validate(),
            Err(ListEquipmentError::InvalidOrdering(_))
        ));
    }

    async fn seed(pool: &PgPool) -> Uuid {
        let dataset_id: Uuid =
            sqlx::query_scalar("INSERT INTO datasets (name) VALUES ('seed.csv') RETURNING id")
                .fetch_one(pool)
                .await
                .unwrap();

        for (name, equipment_type, material, flowrate, pressure, temperature) in [
            ("Pump-1", "Pump", "Steel", 120.0, 5.2, 110.0),
            ("Pump-2", "Pump", "Copper", 95.0, 3.1, 90.0),
            ("Compressor-1", "Compressor", "Steel", 60.0, 8.4, 95.0),
        ] {
            sqlx::query(
                r#"
                INSERT INTO equipment
                    (dataset_id, name, equipment_type, material, flowrate, pressure, temperature)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(dataset_id)
            .bind(name)
            .bind(equipment_type)
            .bind(material)
            .bind(flowrate)
            .bind(pressure)
            .bind(temperature)
            .execute(pool)
            .await
            .unwrap();
        }

        dataset_id
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unfiltered_listing_returns_everything(pool: PgPool) {
        seed(&pool).await;

        let response = handle(pool, ListEquipmentQuery::default()).await.unwrap();
        assert_eq!(response.items.len(), 3);
        assert_eq!(response.pagination.total, 3);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_search_is_case_insensitive_substring(pool: PgPool) {
        seed(&pool).await;

        let response = handle(
            pool,
            ListEquipmentQuery {
                search: Some("pump".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.items.len(), 2);
        assert!(response.items.iter().all(|r| r.name.starts_with("Pump")));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_material_filter_is_exact(pool: PgPool) {
        seed(&pool).await;

        let response = handle(
            pool,
            ListEquipmentQuery {
                material: Some("Steel".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.items.len(), 2);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_minimum_thresholds_are_inclusive(pool: PgPool) {
        seed(&pool).await;

        let response = handle(
            pool,
            ListEquipmentQuery {
                min_pressure: Some(5.2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.items.len(), 2);
        assert!(response.items.iter().all(|r| r.pressure >= 5.2));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ordering_by_flowrate_descending(pool: PgPool) {
        seed(&pool).await;

        let response = handle(
            pool,
            ListEquipmentQuery {
                ordering: Some("-flowrate".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let flowrates: Vec<f64> = response.items.iter().map(|r| r.flowrate).collect();
        assert_eq!(flowrates, vec![120.0, 95.0, 60.0]);
    }
}
