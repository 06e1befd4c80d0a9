//! Shared validation utilities
//!
//! Common validation functions for input data across commands and queries.

use thiserror::Error;

/// Errors that can occur during name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,

    #[error("Name must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },
}

/// Validate a name field
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed max_length characters
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Required);
    }

    if name.len() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}

/// Validate a free-text label (type, material) that may be empty
///
/// # Rules
/// - Must not exceed max_length characters
pub fn validate_label(label: &str, max_length: usize) -> Result<(), NameValidationError> {
    if label.len() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}
