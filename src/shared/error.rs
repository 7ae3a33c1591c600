//! Shared Error Types
//!
//! This module defines the error raised when client input is malformed.
//! The backend surfaces it to the caller as-is and never retries.
//!
//! # Usage
//!
//! ```rust
//! use batepapo::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "must not be empty");
//! ```
use thiserror::Error;

/// Errors raised while validating client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("limit", "must be a positive integer");
        match &error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "limit");
                assert_eq!(message, "must be a positive integer");
            }
        }
        assert_eq!(error.field(), "limit");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("text", "must not be empty");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("'text'"));
        assert!(display.contains("must not be empty"));
    }
}
