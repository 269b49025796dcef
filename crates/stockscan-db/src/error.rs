//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► ApiError (scanner commands) ← code + message                │
//! │       │                                                                 │
//! │       └──► Inventory tab: logged, rendered as an empty list            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Seeding an `itemID` that already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Copying the bundled database asset into place failed.
    #[error("Provisioning from asset failed: {0}")]
    ProvisionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Asset database without a `products` table and migrations disabled
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → UniqueViolation or QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: products.itemID"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::not_found("Item", 42).to_string(),
            "Item not found: 42"
        );
        assert_eq!(
            DbError::PoolExhausted.to_string(),
            "Connection pool exhausted"
        );
    }

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
    }
}
