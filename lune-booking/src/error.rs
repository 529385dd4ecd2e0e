//! Error types for booking operations
//!
//! Every kind except `Storage` is a logic error detected at the boundary of
//! the operation. None of them are retried.

use thiserror::Error;
use uuid::Uuid;

use crate::meeting::{MeetingAction, MeetingStatus};

/// Booking error types.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("member", "cast", "meeting_request", ...)
        entity: &'static str,
        /// Requested ID
        id: Uuid,
    },

    /// Actor's role or tier does not permit the view or action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested state change is not legal from the current state
    #[error("Cannot {action} a meeting request that is {from}")]
    InvalidTransition {
        /// Status at the time of the attempt
        from: MeetingStatus,
        /// Attempted action
        action: MeetingAction,
    },

    /// Required input is missing or malformed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Shorthand for a not-found error.
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        BookingError::NotFound { entity, id }
    }

    /// Shorthand for a forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        BookingError::Forbidden(reason.into())
    }

    /// Shorthand for a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        BookingError::Validation(reason.into())
    }

    /// Check if this error indicates an infrastructure failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, BookingError::Storage(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BookingError::NotFound { .. } => 404,
            BookingError::Forbidden(_) => 403,
            BookingError::InvalidTransition { .. } => 409,
            BookingError::Validation(_) => 422,
            BookingError::Storage(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::NotFound { .. } => "NOT_FOUND",
            BookingError::Forbidden(_) => "FORBIDDEN",
            BookingError::InvalidTransition { .. } => "INVALID_TRANSITION",
            BookingError::Validation(_) => "VALIDATION_ERROR",
            BookingError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookingError::not_found("cast", Uuid::nil()).status_code(), 404);
        assert_eq!(BookingError::forbidden("tier").status_code(), 403);
        assert_eq!(
            BookingError::InvalidTransition {
                from: MeetingStatus::Cancelled,
                action: MeetingAction::Confirm,
            }
            .status_code(),
            409
        );
        assert_eq!(BookingError::validation("missing").status_code(), 422);
        assert_eq!(BookingError::Storage("down".into()).status_code(), 500);
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = BookingError::InvalidTransition {
            from: MeetingStatus::Completed,
            action: MeetingAction::Cancel,
        };
        assert_eq!(
            err.to_string(),
            "Cannot cancel a meeting request that is completed"
        );
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(!err.is_server_error());
    }
}
