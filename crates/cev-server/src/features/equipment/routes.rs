use crate::api::response::{ApiResponse, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    commands::{
        CreateEquipmentCommand, CreateEquipmentError, DeleteEquipmentCommand,
        DeleteEquipmentError, UpdateEquipmentCommand, UpdateEquipmentError,
    },
    queries::{
        ExportEquipmentError, ExportEquipmentQuery, GetEquipmentError, GetEquipmentQuery,
        ListEquipmentError, ListEquipmentQuery,
    },
};

pub fn equipment_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route("/export/csv", get(export_equipment_csv))
        .route(
            "/:id",
            get(get_equipment).put(update_equipment).delete(delete_equipment),
        )
}

#[tracing::instrument(skip(pool, query), fields(search = ?query.search, material = ?query.material))]
async fn list_equipment(
    State(pool): State<PgPool>,
    Query(query): Query<ListEquipmentQuery>,
) -> Result<Response, EquipmentApiError> {
    let response = super::queries::list::handle(pool, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.pagination.total,
        "Equipment listed via API"
    );

    let meta = json!({
        "pagination": response.pagination
    });

    Ok((StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta)))
        .into_response())
}

#[tracing::instrument(skip(pool), fields(id = %id))]
async fn get_equipment(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, EquipmentApiError> {
    let row = super::queries::get::handle(pool, GetEquipmentQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(row))).into_response())
}

#[tracing::instrument(skip(pool, command), fields(dataset_id = %command.dataset_id, name = %command.name))]
async fn create_equipment(
    State(pool): State<PgPool>,
    Json(command): Json<CreateEquipmentCommand>,
) -> Result<Response, EquipmentApiError> {
    let row = super::commands::create::handle(pool, command).await?;

    tracing::info!(equipment_id = %row.id, "Equipment created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))).into_response())
}

#[tracing::instrument(skip(pool, command), fields(id = %id))]
async fn update_equipment(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(mut command): Json<UpdateEquipmentCommand>,
) -> Result<Response, EquipmentApiError> {
    command.id = id;

    let row = super::commands::update::handle(pool, command).await?;

    tracing::info!(equipment_id = %row.id, "Equipment updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(row))).into_response())
}

#[tracing::instrument(skip(pool), fields(id = %id))]
async fn delete_equipment(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, EquipmentApiError> {
    let response = super::commands::delete::handle(pool, DeleteEquipmentCommand { id }).await?;

    tracing::info!(equipment_id = %response.id, "Equipment deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// No authentication, matching the observed behavior of the original export
// endpoint (unlike upload and report).
#[tracing::instrument(skip(pool, query))]
async fn export_equipment_csv(
    State(pool): State<PgPool>,
    Query(query): Query<ExportEquipmentQuery>,
) -> Result<Response, EquipmentApiError> {
    let csv_bytes = super::queries::export::handle(pool, query).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"equipment.csv\"".to_string(),
            ),
        ],
        csv_bytes,
    )
        .into_response())
}

#[derive(Debug)]
enum EquipmentApiError {
    ListError(ListEquipmentError),
    GetError(GetEquipmentError),
    CreateError(CreateEquipmentError),
    UpdateError(UpdateEquipmentError),
    DeleteError(DeleteEquipmentError),
    ExportError(ExportEquipmentError),
}

impl From<ListEquipmentError> for EquipmentApiError {
    fn from(err: ListEquipmentError) -> Self {
        Self::ListError(err)
    }
}

impl From<GetEquipmentError> for EquipmentApiError {
    fn from(err: GetEquipmentError) -> Self {
        Self::GetError(err)
    }
}

impl From<CreateEquipmentError> for EquipmentApiError {
    fn from(err: CreateEquipmentError) -> Self {
        Self::CreateError(err)
    }
}

impl From<UpdateEquipmentError> for EquipmentApiError {
    fn from(err: UpdateEquipmentError) -> Self {
        Self::UpdateError(err)
    }
}

impl From<DeleteEquipmentError> for EquipmentApiError {
    fn from(err: DeleteEquipmentError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<ExportEquipmentError> for EquipmentApiError {
    fn from(err: ExportEquipmentError) -> Self {
        Self::ExportError(err)
    }
}

impl IntoResponse for EquipmentApiError {
    fn into_response(self) -> Response {
        match self {
            EquipmentApiError::ListError(ListEquipmentError::InvalidPage)
            | EquipmentApiError::ListError(ListEquipmentError::InvalidPerPage)
            | EquipmentApiError::ListError(ListEquipmentError::InvalidOrdering(_))
            | EquipmentApiError::CreateError(CreateEquipmentError::NameValidation(_))
            | EquipmentApiError::UpdateError(UpdateEquipmentError::NameValidation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },

            EquipmentApiError::GetError(GetEquipmentError::NotFound(_))
            | EquipmentApiError::CreateError(CreateEquipmentError::DatasetNotFound(_))
            | EquipmentApiError::UpdateError(UpdateEquipmentError::NotFound(_))
            | EquipmentApiError::DeleteError(DeleteEquipmentError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },

            EquipmentApiError::ExportError(ExportEquipmentError::Csv(_)) => {
                tracing::error!("CSV serialization error during export: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "Export serialization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            EquipmentApiError::ListError(ListEquipmentError::Database(_))
            | EquipmentApiError::GetError(GetEquipmentError::Database(_))
            | EquipmentApiError::CreateError(CreateEquipmentError::Database(_))
            | EquipmentApiError::UpdateError(UpdateEquipmentError::Database(_))
            | EquipmentApiError::DeleteError(DeleteEquipmentError::Database(_))
            | EquipmentApiError::ExportError(ExportEquipmentError::Database(_)) => {
                tracing::error!("Database error during equipment operation: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for EquipmentApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListError(e) => write!(f, "{}", e),
            Self::GetError(e) => write!(f, "{}", e),
            Self::CreateError(e) => write!(f, "{}", e),
            Self::UpdateError(e) => write!(f, "{}", e),
            Self::DeleteError(e) => write!(f, "{}", e),
            Self::ExportError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EquipmentApiError::ListError(ListEquipmentError::InvalidPage);
        assert!(err.to_string().contains("Page"));
    }

    #[test]
    fn test_routes_structure() {
        let router = equipment_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
