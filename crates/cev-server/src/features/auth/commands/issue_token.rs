//! Issue token command
//!
//! Exchanges username/password credentials for an API token. A user keeps
//! one token: repeated logins return the existing token rather than
//! minting a new one.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::password;

/// Command to issue an API token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenCommand {
    pub username: String,
    pub password: String,
}

/// Response carrying the issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenResponse {
    pub token: String,
}

/// Errors that can occur when issuing a token
#[derive(Debug, thiserror::Error)]
pub enum IssueTokenError {
    #[error("Username is required and cannot be empty")]
    UsernameRequired,
    #[error("Password is required and cannot be empty")]
    PasswordRequired,
    /// One message for both unknown user and wrong password, so the
    /// endpoint does not leak which usernames exist.
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<IssueTokenResponse, IssueTokenError>> for IssueTokenCommand {}

impl crate::cqrs::middleware::Command for IssueTokenCommand {}

impl IssueTokenCommand {
    /// Validates the command parameters
    pub fn validate(&self) -> Result<(), IssueTokenError> {
        if self.username.trim().is_empty() {
            return Err(IssueTokenError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(IssueTokenError::PasswordRequired);
        }
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserCredentials {
    id: Uuid,
    password_salt: String,
    password_hash: String,
}

/// Handles the issue token command
#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: IssueTokenCommand,
) -> Result<IssueTokenResponse, IssueTokenError> {
    command.validate()?;

    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, password_salt, password_hash FROM users WHERE username = $1",
    )
    .bind(command.username.trim())
    .fetch_optional(&pool)
    .await?
    .ok_or(IssueTokenError::InvalidCredentials)?;

    if !password::verify_password(&user.password_salt, &user.password_hash, &command.password) {
        return Err(IssueTokenError::InvalidCredentials);
    }

    let existing: Option<String> =
        sqlx::query_scalar("SELECT token FROM api_tokens WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&pool)
            .await?;

    if let Some(token) = existing {
        return Ok(IssueTokenResponse { token });
    }

    let token = password::generate_token();
    sqlx::query("INSERT INTO api_tokens (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user.id)
        .execute(&pool)
        .await?;

    tracing::info!(user_id = %user.id, "API token issued");

    Ok(IssueTokenResponse { token })
}
