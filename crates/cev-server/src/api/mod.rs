//! API assembly and response envelopes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;

use crate::{config::Config, error::AppError, features, features::FeatureState, middleware};

pub mod response;

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/", get(api_home))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .with_state(state.clone())
        .nest("/api/v1", features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// API home handler
async fn api_home() -> impl IntoResponse {
    Json(json!({
        "project": "Chemical Equipment Parameter Visualizer",
        "status": "Backend API Running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Get platform statistics
async fn get_stats(State(db): State<PgPool>) -> Result<Response, AppError> {
    let (datasets, equipment) = tokio::join!(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM datasets").fetch_one(&db),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM equipment").fetch_one(&db),
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "datasets": datasets?,
            "equipment": equipment?,
        })),
    )
        .into_response())
}

/// Health check handler
async fn health_check(State(db): State<PgPool>) -> Result<Response, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&db).await {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}
