//! Token authentication extractor
//!
//! Handlers that require a caller identity take an [`AuthUser`] argument.
//! The extractor validates the `Authorization` header against the
//! `api_tokens` table before the handler body runs, so unauthenticated
//! requests are rejected before any domain logic executes.
//!
//! Both `Authorization: Token <key>` and `Authorization: Bearer <key>`
//! schemes are accepted.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::response::ErrorResponse;

/// The authenticated caller, resolved from an API token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided")]
    MissingCredentials,
    #[error("Invalid authorization header")]
    InvalidScheme,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidScheme | AuthError::InvalidToken => {
                let error = ErrorResponse::new("UNAUTHORIZED", self.to_string());
                (StatusCode::UNAUTHORIZED, Json(error)).into_response()
            },
            AuthError::Database(ref e) => {
                tracing::error!("Database error during authentication: {:?}", e);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TokenOwner {
    id: Uuid,
    username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;

        let token = header_value
            .strip_prefix("Token ")
            .or_else(|| header_value.strip_prefix("Bearer "))
            .ok_or(AuthError::InvalidScheme)?
            .trim();

        if token.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let pool = PgPool::from_ref(state);
        let owner = sqlx::query_as::<_, TokenOwner>(
            r#"
            SELECT u.id, u.username
            FROM api_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&pool)
        .await?;

        owner
            .map(|o| AuthUser {
                user_id: o.id,
                username: o.username,
            })
            .ok_or(AuthError::InvalidToken)
    }
}
