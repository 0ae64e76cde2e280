//! Error responses.
//!
//! Every failed request answers with
//! `{"error": "<ERROR_CODE>", "reason": "<specific>", "message": "<text>"}`.
//! Storage and server failures are logged and reported without detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use fesa_db::{AdError, CategoryError, LedgerError, StatsError, UserError};
use fesa_shared::AppError;

/// An [`AppError`] paired with a machine-readable reason.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    reason: &'static str,
}

impl ApiError {
    /// Wraps an application error with a reason.
    #[must_use]
    pub const fn new(reason: &'static str, error: AppError) -> Self {
        Self { error, reason }
    }

    /// 401: no usable credential.
    pub fn unauthorized(reason: &'static str, message: impl Into<String>) -> Self {
        Self::new(reason, AppError::Unauthorized(message.into()))
    }

    /// 403: credential present but insufficient.
    pub fn forbidden(reason: &'static str, message: impl Into<String>) -> Self {
        Self::new(reason, AppError::Forbidden(message.into()))
    }

    /// 400: malformed input.
    pub fn validation(reason: &'static str, message: impl Into<String>) -> Self {
        Self::new(reason, AppError::Validation(message.into()))
    }

    /// 500: unexpected failure.
    pub fn internal(reason: &'static str, message: impl Into<String>) -> Self {
        Self::new(reason, AppError::Internal(message.into()))
    }

    /// The wrapped error.
    #[must_use]
    pub const fn error(&self) -> &AppError {
        &self.error
    }

    /// The machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.error.is_internal() {
            error!(reason = self.reason, error = %self.error, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.error.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.error.error_code(),
                "reason": self.reason,
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self::new(err.reason(), err.into())
    }
}

impl From<AdError> for ApiError {
    fn from(err: AdError) -> Self {
        Self::new(err.reason(), err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::new(err.reason(), err.into())
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        Self::new(err.reason(), err.into())
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        Self::new("database_error", err.into())
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::new("database_error", AppError::Database(err.to_string()))
    }
}
