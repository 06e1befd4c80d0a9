//! Create the demo user and print its API token
//!
//! Seeds a `demo`/`demo` account for local development, reusing the
//! existing user and token when already present.

use anyhow::Result;
use cev_common::logging::{init_logging, LogConfig};
use cev_server::config::Config;
use cev_server::features::auth::password;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo";

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::from_env().unwrap_or_default();
    init_logging(&log_config)?;

    let config = Config::load()?;
    let pool = cev_server::db::create_pool(&config.database).await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let user_id = get_or_create_user(&pool).await?;
    let token = get_or_create_token(&pool, user_id).await?;

    info!(username = DEMO_USERNAME, password = DEMO_PASSWORD, "Demo credentials ready");
    info!(%token, "API token");

    Ok(())
}

async fn get_or_create_user(pool: &PgPool) -> Result<Uuid> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(DEMO_USERNAME)
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        info!("User \"demo\" already exists");
        return Ok(id);
    }

    let salt = password::generate_salt();
    let hash = password::hash_password(&salt, DEMO_PASSWORD);

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (username, password_salt, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(DEMO_USERNAME)
    .bind(salt)
    .bind(hash)
    .fetch_one(pool)
    .await?;

    info!("Created user \"demo\"");
    Ok(id)
}

async fn get_or_create_token(pool: &PgPool, user_id: Uuid) -> Result<String> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT token FROM api_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    if let Some(token) = existing {
        return Ok(token);
    }

    let token = password::generate_token();
    sqlx::query("INSERT INTO api_tokens (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(token)
}
