//! Dataset feature slice
//!
//! CSV upload ingestion, recent-dataset listing, aggregate summaries,
//! PDF reports, and deletion.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod summary;
pub mod types;

pub use routes::datasets_routes;
