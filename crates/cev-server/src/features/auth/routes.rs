use crate::api::response::{ApiResponse, ErrorResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use sqlx::PgPool;

use super::commands::{IssueTokenCommand, IssueTokenError};

pub fn auth_routes() -> Router<PgPool> {
    Router::new().route("/token", post(issue_token))
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn issue_token(
    State(pool): State<PgPool>,
    Json(command): Json<IssueTokenCommand>,
) -> Result<Response, AuthApiError> {
    let response = super::commands::issue_token::handle(pool, command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[derive(Debug)]
enum AuthApiError {
    IssueError(IssueTokenError),
}

impl From<IssueTokenError> for AuthApiError {
    fn from(err: IssueTokenError) -> Self {
        Self::IssueError(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        match self {
            AuthApiError::IssueError(IssueTokenError::UsernameRequired)
            | AuthApiError::IssueError(IssueTokenError::PasswordRequired) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            AuthApiError::IssueError(IssueTokenError::InvalidCredentials) => {
                let error = ErrorResponse::new("INVALID_CREDENTIALS", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            AuthApiError::IssueError(IssueTokenError::Database(_)) => {
                tracing::error!("Database error during token issuance: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for AuthApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssueError(e) => write!(f, "{}", e),
        }
    }
}
