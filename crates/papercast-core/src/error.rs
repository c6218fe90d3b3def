//! Error types module
//!
//! This module provides the core error types used throughout the papercast
//! application. All errors are unified under the `AppError` enum, which covers
//! upload validation, backend connectivity, and internal failures.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like an unreachable backend
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Stage of the conversion flow an error originated from. Client-side
/// notices carry this so the caller can distinguish a rejected upload from
/// a dead backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// Input was rejected before any network activity
    Validation,
    /// The service could not be reached at all
    Network,
    /// The service was reached but reported a failure
    Backend,
    /// Failure inside this process
    Internal,
}

impl ErrorStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStage::Validation => "validation",
            ErrorStage::Network => "network",
            ErrorStage::Backend => "backend",
            ErrorStage::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("No file provided")]
    MissingFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend unreachable: {0}")]
    BackendUnavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::UnsupportedType(_) => (
            400,
            "UNSUPPORTED_TYPE",
            false,
            Some("Select a PDF document and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::TooLarge { .. } => (
            413,
            "TOO_LARGE",
            false,
            Some("Reduce the PDF size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingFile => (
            400,
            "MISSING_FILE",
            false,
            Some("Attach a PDF file to the request"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BackendUnavailable(_) => (
            503,
            "BACKEND_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::Backend(_) => (
            502,
            "BACKEND_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::UnsupportedType(_) => "UnsupportedType",
            AppError::TooLarge { .. } => "TooLarge",
            AppError::MissingFile => "MissingFile",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BackendUnavailable(_) => "BackendUnavailable",
            AppError::Backend(_) => "Backend",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Stage of the flow this error belongs to, for client-side notices.
    pub fn stage(&self) -> ErrorStage {
        match self {
            AppError::UnsupportedType(_)
            | AppError::TooLarge { .. }
            | AppError::MissingFile
            | AppError::InvalidInput(_) => ErrorStage::Validation,
            AppError::BackendUnavailable(_) => ErrorStage::Network,
            AppError::Backend(_) => ErrorStage::Backend,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => ErrorStage::Internal,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::UnsupportedType(_) => "Please upload a PDF file".to_string(),
            AppError::TooLarge { limit, .. } => {
                format!(
                    "File too large. Maximum size is {}MB",
                    limit / crate::upload::BYTES_PER_MB
                )
            }
            AppError::MissingFile => "No file provided".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BackendUnavailable(_) => {
                "Could not reach the podcast generation service".to_string()
            }
            AppError::Backend(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
