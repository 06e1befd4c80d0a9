//! Feature modules implementing the CEV API
//!
//! Each feature is a vertical slice following the CQRS (Command Query
//! Responsibility Segregation) pattern, with its own commands, queries, and
//! routes:
//!
//! - **datasets**: CSV upload ingestion, recent listing, aggregate
//!   summaries, PDF reports, deletion
//! - **equipment**: filtered listing, CRUD, CSV export
//! - **auth**: API token issuance
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (one file per command)
//! - `queries/` - Read operations (one file per query)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared types (if needed)

pub mod auth;
pub mod datasets;
pub mod equipment;
pub mod shared;

use axum::{extract::FromRef, Router};

use crate::report::ReportRenderer;

/// Shared state for all feature routes
#[derive(Clone, FromRef)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
    /// PDF report renderer (may be in the unavailable state)
    pub reports: ReportRenderer,
}

/// Creates the main API router with all feature routes mounted
///
/// Each feature is mounted under its own path prefix:
/// - `/datasets` - Dataset ingestion, summaries, and reports
/// - `/equipment` - Equipment CRUD, filtering, and export
/// - `/auth` - Token issuance
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/datasets", datasets::datasets_routes().with_state(state.clone()))
        .nest("/equipment", equipment::equipment_routes().with_state(state.db.clone()))
        .nest("/auth", auth::auth_routes().with_state(state.db.clone()))
}
