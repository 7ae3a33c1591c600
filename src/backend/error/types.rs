/**
 * Backend Error Types
 *
 * This module defines the errors returned by the presence tracker, the
 * message board and the HTTP handlers on top of them.
 *
 * # Error Categories
 *
 * - `SharedError` - Malformed input (empty name, bad limit, unknown type)
 * - `Conflict` - Joining with a name that is already present
 * - `NotFound` - Heartbeat for a participant that is not present
 * - `UnknownSender` - Sending a message from a name that is not present
 * - `StoreError` - The underlying store failed
 *
 * None of these are retried. The reaper logs its errors instead of
 * returning them.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use batepapo::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::conflict("Ana");
/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A participant with this name is already in the room
    #[error("Participant '{name}' is already in the room")]
    Conflict { name: String },

    /// No participant with this name is in the room
    #[error("Participant '{name}' is not in the room")]
    NotFound { name: String },

    /// The sender of a message is not in the room
    #[error("Sender '{name}' is not in the room")]
    UnknownSender { name: String },

    /// Invalid client input
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Store failure
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl BackendError {
    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn unknown_sender(name: impl Into<String>) -> Self {
        Self::UnknownSender { name: name.into() }
    }

    /// Shorthand for a [`SharedError::ValidationError`]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Conflict` - 409 Conflict
    /// - `NotFound` - 404 Not Found
    /// - `UnknownSender` - 422 Unprocessable Entity
    /// - `SharedError` - 422 Unprocessable Entity
    /// - `StoreError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnknownSender { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SharedError(SharedError::ValidationError { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Store failures are reported generically; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::StoreError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::conflict("Ana").status_code(), StatusCode::CONFLICT);
        assert_eq!(BackendError::not_found("Ana").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::unknown_sender("Ana").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            BackendError::validation("name", "must not be empty").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let store_error = BackendError::from(StoreError::Duplicate { key: "x".into() });
        assert_eq!(store_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_shared_error() {
        let shared_error = SharedError::validation("field", "message");
        let backend_error: BackendError = shared_error.into();
        assert_matches!(backend_error, BackendError::SharedError(_));
    }

    #[test]
    fn test_error_message() {
        assert!(BackendError::conflict("Ana").message().contains("Ana"));

        let store_error = BackendError::from(StoreError::Duplicate { key: "secret".into() });
        assert!(!store_error.message().contains("secret"));
    }
}
