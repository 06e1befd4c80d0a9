//! Error types for CEV

use thiserror::Error;

/// Result type alias for CEV operations
pub type Result<T> = std::result::Result<T, CevError>;

/// Main error type for CEV
#[derive(Error, Debug)]
pub enum CevError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Equipment not found: {0}")]
    EquipmentNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
