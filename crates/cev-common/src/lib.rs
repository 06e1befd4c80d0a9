//! CEV Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the CEV project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all CEV workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized tracing initialization
//! - **Types**: Shared domain types for equipment records
//!
//! # Example
//!
//! ```no_run
//! use cev_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CevError, Result};
pub use types::EquipmentFields;
