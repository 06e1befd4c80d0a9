//! Equipment feature slice
//!
//! Filtered listing, CRUD, and CSV export over individual equipment rows.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::equipment_routes;
