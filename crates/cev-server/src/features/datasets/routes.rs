use crate::api::response::{ApiResponse, ErrorResponse};
use crate::features::FeatureState;
use crate::middleware::auth::AuthUser;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    commands::{
        DeleteDatasetCommand, DeleteDatasetError, IngestDatasetCommand, IngestDatasetError,
    },
    queries::{
        GetReportError, GetReportQuery, GetSummaryError, GetSummaryQuery, ListRecentDatasetsError,
        ListRecentDatasetsQuery,
    },
};

pub fn datasets_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_recent_datasets))
        .route("/upload", post(upload_dataset))
        .route("/:id/summary", get(get_dataset_summary))
        .route("/:id/report/pdf", get(get_dataset_report))
        .route("/:id", delete(delete_dataset))
}

#[tracing::instrument(skip(pool, user, multipart), fields(username = %user.username))]
async fn upload_dataset(
    State(pool): State<PgPool>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Response, DatasetApiError> {
    let mut filename: Option<String> = None;
    let mut name_override: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DatasetApiError::Multipart(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| DatasetApiError::Multipart(e.to_string()))?;
                content = Some(data.to_vec());
            },
            "name" => {
                name_override = field
                    .text()
                    .await
                    .map(|s| s.trim().to_string())
                    .ok()
                    .filter(|s| !s.is_empty());
            },
            _ => {},
        }
    }

    let command = IngestDatasetCommand {
        filename: name_override.or(filename),
        content: content.unwrap_or_default(),
    };

    let response = super::commands::ingest::handle(pool, command).await?;

    tracing::info!(
        dataset_id = %response.dataset.id,
        created = response.created,
        "Dataset uploaded via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_recent_datasets(State(pool): State<PgPool>) -> Result<Response, DatasetApiError> {
    let summaries =
        super::queries::list_recent::handle(pool, ListRecentDatasetsQuery::default()).await?;

    tracing::debug!(count = summaries.len(), "Recent datasets listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(summaries))).into_response())
}

#[tracing::instrument(skip(pool), fields(dataset_id = %id))]
async fn get_dataset_summary(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let summary =
        super::queries::get_summary::handle(pool, GetSummaryQuery { dataset_id: id }).await?;

    tracing::debug!(
        equipment_count = summary.equipment_count,
        "Dataset summary retrieved via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(summary))).into_response())
}

#[tracing::instrument(skip(state, user), fields(dataset_id = %id, username = %user.username))]
async fn get_dataset_report(
    State(state): State<FeatureState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let pdf = super::queries::get_report::handle(
        state.db,
        state.reports,
        GetReportQuery { dataset_id: id },
    )
    .await?;

    tracing::info!(bytes = pdf.len(), "Dataset report rendered via API");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"dataset_{}.pdf\"", id),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[tracing::instrument(skip(pool, user), fields(dataset_id = %id, username = %user.username))]
async fn delete_dataset(
    State(pool): State<PgPool>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let response = super::commands::delete::handle(pool, DeleteDatasetCommand { id }).await?;

    tracing::info!("Dataset deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[derive(Debug)]
enum DatasetApiError {
    IngestError(IngestDatasetError),
    DeleteError(DeleteDatasetError),
    SummaryError(GetSummaryError),
    ListError(ListRecentDatasetsError),
    ReportError(GetReportError),
    Multipart(String),
}

impl From<IngestDatasetError> for DatasetApiError {
    fn from(err: IngestDatasetError) -> Self {
        Self::IngestError(err)
    }
}

impl From<DeleteDatasetError> for DatasetApiError {
    fn from(err: DeleteDatasetError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<GetSummaryError> for DatasetApiError {
    fn from(err: GetSummaryError) -> Self {
        Self::SummaryError(err)
    }
}

impl From<ListRecentDatasetsError> for DatasetApiError {
    fn from(err: ListRecentDatasetsError) -> Self {
        Self::ListError(err)
    }
}

impl From<GetReportError> for DatasetApiError {
    fn from(err: GetReportError) -> Self {
        Self::ReportError(err)
    }
}

impl IntoResponse for DatasetApiError {
    fn into_response(self) -> Response {
        match self {
            DatasetApiError::IngestError(IngestDatasetError::FileRequired)
            | DatasetApiError::IngestError(IngestDatasetError::Parse(_))
            | DatasetApiError::Multipart(_) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            DatasetApiError::IngestError(IngestDatasetError::Database(_)) => {
                tracing::error!("Database error during dataset ingestion: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            DatasetApiError::DeleteError(DeleteDatasetError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            DatasetApiError::DeleteError(DeleteDatasetError::Database(_)) => {
                tracing::error!("Database error during dataset deletion: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            DatasetApiError::SummaryError(GetSummaryError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            DatasetApiError::SummaryError(GetSummaryError::Database(_)) => {
                tracing::error!("Database error during summary retrieval: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            DatasetApiError::ListError(ListRecentDatasetsError::Database(_)) => {
                tracing::error!("Database error during recent dataset listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            DatasetApiError::ReportError(GetReportError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            DatasetApiError::ReportError(GetReportError::Unavailable) => {
                let error = ErrorResponse::new("REPORT_UNAVAILABLE", self.to_string());
                (StatusCode::NOT_IMPLEMENTED, Json(error)).into_response()
            },
            DatasetApiError::ReportError(GetReportError::Render(_)) => {
                tracing::error!("Report rendering failed: {}", self);
                let error = ErrorResponse::new("REPORT_ERROR", "Report rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            DatasetApiError::ReportError(GetReportError::Database(_)) => {
                tracing::error!("Database error during report rendering: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for DatasetApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IngestError(e) => write!(f, "{}", e),
            Self::DeleteError(e) => write!(f, "{}", e),
            Self::SummaryError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
            Self::ReportError(e) => write!(f, "{}", e),
            Self::Multipart(e) => write!(f, "Invalid multipart body: {}", e),
        }
    }
}
