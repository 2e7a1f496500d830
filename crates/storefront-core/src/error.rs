//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog and cart failures                      │
//! │  └── ValidationError  - Input / record validation failures             │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the view sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product id is not part of the loaded catalog.
    ///
    /// ## When This Occurs
    /// - `add` was asked for an id the catalog never contained
    /// - A stale view still shows a product from an older catalog file
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog document could not be decoded.
    #[error("Catalog is not valid JSON: {0}")]
    CatalogFormat(String),

    /// A catalog record failed validation.
    ///
    /// `index` is the zero-based position of the record in the catalog file.
    #[error("Catalog record {index} is invalid: {source}")]
    InvalidProduct {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Incrementing a line would overflow its quantity.
    #[error("Quantity for product {product_id} cannot grow any further")]
    QuantityOverflow { product_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two catalog records with one id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = CoreError::InvalidProduct {
            index: 3,
            source: ValidationError::Negative {
                field: "price".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Catalog record 3 is invalid: price must not be negative"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
