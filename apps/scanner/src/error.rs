//! # Error Types
//!
//! Errors of the scanner application.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockScan                              │
//! │                                                                         │
//! │  Startup (run)                         Commands (shell input)           │
//! │  ─────────────                         ──────────────────────           │
//! │  config / db / io failure              device rejects a capture         │
//! │         │                              bad shell argument               │
//! │         ▼                                      │                        │
//! │     AppError ──► logged, exit 1                ▼                        │
//! │                                        ApiError { code, message }       │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                                        printed under the screen         │
//! │                                                                         │
//! │  NOT errors: scan flow events in the wrong screen (ignored),            │
//! │              inventory query failure (empty list, logged)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockscan_core::{CoreError, ValidationError};
use stockscan_db::DbError;
use thiserror::Error;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Barcode type 'qr' is not enabled"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Camera permission missing
    PermissionDenied,

    /// Database operation failed
    DatabaseError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a permission error.
    pub fn permission_denied() -> Self {
        ApiError::new(ErrorCode::PermissionDenied, "Camera permission not granted")
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, value } => ApiError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

// =============================================================================
// App Error
// =============================================================================

/// Startup and top-level failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file could not be parsed.
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A command failed.
    #[error("{0}")]
    Command(#[from] ApiError),

    /// No platform directory could be determined.
    #[error("Could not determine the application data directory")]
    NoDataDir,

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for application startup.
pub type AppResult<T> = Result<T, AppError>;
