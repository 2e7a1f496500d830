//! # Database Errors
//!
//! ```text
//! sqlx::Error ───────────┐
//! MigrateError ──────────┼──► DbError ──► ApiError (one-line message)
//! serde_json::Error ─────┘
//! ```
//!
//! Reads of the saved cart never fail on bad content; only saving can
//! produce `Serialization`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened, or the pool is closed or
    /// timed out.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A value could not be encoded for storage.
    #[error("Invalid stored value for '{key}': {reason}")]
    Serialization { key: String, reason: String },

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn serialization(key: impl Into<String>, err: serde_json::Error) -> Self {
        DbError::Serialization {
            key: key.into(),
            reason: err.to_string(),
        }
    }
}

/// ```text
/// sqlx::Error::Database      → QueryFailed
/// sqlx::Error::PoolClosed    → ConnectionFailed
/// sqlx::Error::PoolTimedOut  → ConnectionFailed
/// Other                      → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("database is closed".to_string()),
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("timed out waiting for a connection".to_string())
            }
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_connection_failures() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_serialization_names_the_key() {
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err = DbError::serialization("cart", json_err);
        assert!(err.to_string().starts_with("Invalid stored value for 'cart'"));
    }
}
