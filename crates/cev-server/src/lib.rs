//! CEV Server Library
//!
//! HTTP server for managing chemical equipment datasets.
//!
//! # Overview
//!
//! The CEV server provides a REST API over PostgreSQL for:
//!
//! - **CSV Ingestion**: Multipart uploads parsed into datasets with
//!   per-row defect tolerance
//! - **Aggregation**: On-demand dataset summaries (counts, averages,
//!   type distribution), never cached
//! - **Equipment CRUD**: Filtered listing, export, and row management
//! - **PDF Reports**: Tabular per-dataset reports behind an explicit
//!   capability flag
//! - **Token Authentication**: Username/password exchange for API tokens
//!
//! # Architecture
//!
//! Features follow a CQRS (Command Query Responsibility Segregation)
//! layout: each feature is a vertical slice with its own commands (write
//! operations), queries (read operations), and routes. Handlers are plain
//! `handle(pool, input)` functions, registered with the mediator in
//! [`cqrs::build_mediator`] and called directly from the route layer.
//!
//! ## Framework Stack
//!
//! - **Axum**: HTTP routing, extractors, multipart handling
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: Middleware (CORS, tracing, compression)
//!
//! # Example
//!
//! ```no_run
//! use cev_server::{api, config::Config, features::FeatureState, report::ReportRenderer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let db = cev_server::db::create_pool(&config.database).await?;
//!     let state = FeatureState {
//!         db,
//!         reports: ReportRenderer::from_config(&config.report),
//!     };
//!     let app = api::create_router(state, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod report;

// Re-export commonly used types
pub use error::{AppError, AppResult};
