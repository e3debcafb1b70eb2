/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Validation errors
 *
 * Request bodies that fail validation return field-level detail:
 * - Missing or malformed fields
 * - Password confirmation mismatch
 *
 * ## Authentication errors
 *
 * Credential failures return a generic message so a caller cannot tell a
 * missing account apart from a wrong password:
 * - Bad login credentials
 * - Invalid, expired, or already-consumed reset tokens
 *
 * ## Infrastructure errors
 *
 * Database or mail failures are logged with detail server-side but surface
 * only a generic message to clients.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// This enum represents all domain and infrastructure failures a handler can
/// produce. Each variant maps to an HTTP status code and a client-safe
/// message; handlers return `Result<_, ApiError>` and rely on the
/// `IntoResponse` impl in `conversion.rs` for the wire shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request field is missing or malformed
    #[error("{message}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// Signup collision: the normalized email already has an account
    #[error("Email already registered")]
    DuplicateIdentity,

    /// Bad credentials. Deliberately does not distinguish "no such
    /// account" from "wrong password".
    #[error("Invalid credentials")]
    AuthFailure,

    /// Reset token is malformed, expired, tampered with, or already
    /// consumed via an intervening password change
    #[error("Token is not valid or expired")]
    InvalidToken,

    /// Password and confirmation do not match
    #[error("Passwords do not match")]
    Mismatch,

    /// Account or profile lookup miss
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database is not configured (no `DATABASE_URL` at startup)
    #[error("Database not configured")]
    Unavailable,

    /// Database query failure
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Anything else that should never reach a client verbatim
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Create a field-level validation error
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Create an internal error from any displayable cause
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateIdentity => StatusCode::CONFLICT,
            Self::AuthFailure => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::BAD_REQUEST,
            Self::Mismatch => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Infrastructure variants intentionally collapse to a generic string;
    /// the underlying cause is logged, not returned.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Field name for validation errors, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_carries_field() {
        let error = ApiError::invalid_input("email", "Invalid email format");
        assert_eq!(error.field(), Some("email"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Invalid email format");
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::DuplicateIdentity.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::AuthFailure.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Mismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound("Account").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_auth_failure_is_generic() {
        // Same message regardless of cause; no account enumeration.
        assert_eq!(ApiError::AuthFailure.message(), "Invalid credentials");
        assert_eq!(ApiError::AuthFailure.field(), None);
    }

    #[test]
    fn test_internal_hides_cause() {
        let error = ApiError::internal("connection refused");
        assert_eq!(error.message(), "Internal server error");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
