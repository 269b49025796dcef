//! # Error Types
//!
//! Domain-specific error types for stockscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockscan-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input parsing / validation failures            │
//! │                                                                         │
//! │  stockscan-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Scanner app errors                                                    │
//! │  ├── ApiError         - What the shell sees (code + message)           │
//! │  └── AppError         - Startup failures (config, database, I/O)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Scan flow events that arrive in the wrong screen are ignored, not
//! reported. The controller answers them with
//! [`Ignored`](crate::scan_flow::Transition::Ignored) so callers can log
//! the reason, but nothing here models them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The capture device reported a symbology this installation does not
    /// accept.
    ///
    /// ## When This Occurs
    /// - Device configured with a wider symbology set than the app
    /// - Typo in a simulated scan (`scan ean31 ...`)
    #[error("Barcode type '{0}' is not enabled")]
    SymbologyNotEnabled(String),

    /// A capture event carried no decoded payload.
    #[error("Capture event has no barcode data")]
    EmptyCapture,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user or device input doesn't meet requirements.
/// Used for early validation before a value reaches the scan flow.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a NotAllowed error from a field name and the accepted values.
    pub fn not_allowed<I, S>(field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SymbologyNotEnabled("pdf417".to_string());
        assert_eq!(err.to_string(), "Barcode type 'pdf417' is not enabled");
        assert_eq!(
            CoreError::EmptyCapture.to_string(),
            "Capture event has no barcode data"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "data".to_string(),
        };
        assert_eq!(err.to_string(), "data is required");

        let err = ValidationError::not_allowed("field", ["name", "price"]);
        assert_eq!(
            err.to_string(),
            r#"field must be one of: ["name", "price"]"#
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "data".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
