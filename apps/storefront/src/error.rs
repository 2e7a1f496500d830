//! # API Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── Storage error?    DbError::QueryFailed(..)    ──┐           │
//! │         ├── Cart / catalog?   CoreError::ProductNotFound  ──┼─► ApiError│
//! │         ├── Bad input?        ValidationError             ──┘           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  The view prints `[NOT_FOUND] Product not found: 42` and carries on.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never end the session; only `quit` and end of input do.

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;
use ts_rs::TS;

/// API error returned from command handlers.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: 42" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id unknown (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// The catalog file could not be loaded
    CatalogUnavailable,

    /// Database operation failed (500)
    DatabaseError,

    /// Cart operation failed
    CartError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogUnavailable => "CATALOG_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CartError => "CART_ERROR",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// The catalog failed to load at startup.
    pub fn catalog_unavailable() -> Self {
        ApiError::new(ErrorCode::CatalogUnavailable, "Catalog unavailable")
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization { key, reason } => {
                tracing::error!(key = %key, "Stored value encoding failed: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Could not save the cart")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CatalogFormat(_) | CoreError::InvalidProduct { .. } => {
                ApiError::catalog_unavailable()
            }
            CoreError::QuantityOverflow { product_id } => ApiError::new(
                ErrorCode::CartError,
                format!("Quantity for {} cannot be increased", product_id),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_not_found_maps_to_not_found() {
        let err = ApiError::from(CoreError::ProductNotFound("42".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 42");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::catalog_unavailable();
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"CATALOG_UNAVAILABLE","message":"Catalog unavailable"}"#);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = ApiError::from(DbError::QueryFailed("no such table: local_storage".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("local_storage"));
    }
}
