//! Auth feature slice
//!
//! Username/password exchange for API tokens. Token validation lives in
//! the [`crate::middleware::auth`] extractor.

pub mod commands;
pub mod password;
pub mod routes;

pub use routes::auth_routes;
