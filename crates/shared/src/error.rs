//! Application-wide error types.
//!
//! Every failure surfaced to a caller is one of these variants. Lower layers
//! keep their own error enums and convert into `AppError` at the boundary.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential was presented.
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// A credential was presented but does not grant access.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate email, duplicate category).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Wallet balance below the required cost.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::InsufficientFunds(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "AUTHENTICATION_REQUIRED",
            Self::Forbidden(_) => "AUTHORIZATION_DENIED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::Database(_) | Self::Internal(_) => "INTERNAL",
        }
    }

    /// Returns true for failures caused by the store or the server itself.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "AUTHENTICATION_REQUIRED")]
    #[case(AppError::Forbidden(String::new()), 403, "AUTHORIZATION_DENIED")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_FAILED")]
    #[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
    #[case(AppError::InsufficientFunds(String::new()), 422, "INSUFFICIENT_FUNDS")]
    #[case(AppError::Database(String::new()), 500, "INTERNAL")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_unauthenticated_and_forbidden_are_distinct() {
        let missing = AppError::Unauthorized("missing".into());
        let invalid = AppError::Forbidden("invalid".into());
        assert_ne!(missing.status_code(), invalid.status_code());
        assert_ne!(missing.error_code(), invalid.error_code());
    }

    #[test]
    fn test_is_internal() {
        assert!(AppError::Database("x".into()).is_internal());
        assert!(AppError::Internal("x".into()).is_internal());
        assert!(!AppError::Conflict("x".into()).is_internal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Unauthorized("msg".into()).to_string(),
            "Authentication required: msg"
        );
        assert_eq!(
            AppError::InsufficientFunds("msg".into()).to_string(),
            "Insufficient funds: msg"
        );
        assert_eq!(
            AppError::Conflict("msg".into()).to_string(),
            "Conflict: msg"
        );
    }
}
