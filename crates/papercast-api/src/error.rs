//! HTTP error handling for the API layer.
//!
//! Wraps [`papercast_core::AppError`] so axum can turn failures into the
//! wire format clients expect: `{ "error": ..., "code": ..., "details": ... }`.
//! The `details` field carries the full error chain and is omitted in
//! production so internals never leak.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use papercast_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, safe to show to end users.
    pub error: String,
    /// Stable machine-readable code, e.g. `TOO_LARGE`.
    pub code: String,
    /// Full error chain for debugging. Absent in production and for
    /// sensitive errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Newtype wrapper so we can implement `IntoResponse` for core errors.
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Failed to read multipart request: {}",
            err.body_text()
        )))
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

fn log_error(error: &AppError) {
    let status = error.http_status_code();
    let code = error.error_code();
    let stage = error.stage();
    let recoverable = error.is_recoverable();
    let detailed = error.detailed_message();

    match error.log_level() {
        LogLevel::Error => {
            tracing::error!(
                error_code = code,
                stage = %stage,
                status = status,
                recoverable = recoverable,
                "{}",
                detailed
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                error_code = code,
                stage = %stage,
                status = status,
                recoverable = recoverable,
                suggested_action = error.suggested_action(),
                "{}",
                detailed
            );
        }
        LogLevel::Debug => {
            tracing::debug!(
                error_code = code,
                stage = %stage,
                status = status,
                recoverable = recoverable,
                "{}",
                detailed
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = self.0;
        log_error(&error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Error chains stay server-side in production or when the error
        // wraps something sensitive.
        let details = if is_production_env() || error.is_sensitive() {
            None
        } else {
            Some(error.detailed_message())
        };

        let body = ErrorResponse {
            error: error.client_message(),
            code: error.error_code().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
