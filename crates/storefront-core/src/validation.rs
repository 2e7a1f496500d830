//! # Validation Module
//!
//! Record and input validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field presence and JSON types                                     │
//! │  └── Prices representable as cents                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty titles, non-negative prices                             │
//! │  └── Unique ids across the catalog                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Catalog::new accepts the records or rejects the whole file            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;
use crate::MAX_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a single catalog record.
///
/// ## Rules
/// - `title` must not be blank
/// - `price` must not be negative
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::types::{Product, ProductId};
/// use storefront_core::validation::validate_product;
///
/// let product = Product {
///     id: ProductId::Number(1),
///     title: "Shoe".to_string(),
///     price: Money::from_cents(5000),
///     category: "shoes".to_string(),
///     image: "shoe.jpg".to_string(),
/// };
/// assert!(validate_product(&product).is_ok());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates every record plus id uniqueness across the catalog.
///
/// Stops at the first failure and reports the record index.
pub fn validate_catalog(products: &[Product]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for (index, product) in products.iter().enumerate() {
        validate_product(product).map_err(|source| CoreError::InvalidProduct { index, source })?;

        if !seen.insert(&product.id) {
            return Err(CoreError::InvalidProduct {
                index,
                source: ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: product.id.to_string(),
                },
            });
        }
    }

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates the grid page size.
///
/// ## Rules
/// - Must be between 1 and `MAX_PAGE_SIZE`
pub fn validate_page_size(page_size: usize) -> ValidationResult<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "page size".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductId;

    fn product(id: i64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::Number(id),
            title: title.to_string(),
            price: Money::from_cents(cents),
            category: "misc".to_string(),
            image: format!("{}.jpg", id),
        }
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = validate_product(&product(1, "   ", 100)).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = validate_product(&product(1, "Hat", -1)).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn test_zero_price_allowed() {
        assert!(validate_product(&product(1, "Sticker", 0)).is_ok());
    }

    #[test]
    fn test_duplicate_id_reports_second_record() {
        let products = vec![product(1, "Hat", 100), product(2, "Cap", 100), product(1, "Hood", 100)];
        match validate_catalog(&products) {
            Err(CoreError::InvalidProduct { index, source }) => {
                assert_eq!(index, 2);
                assert!(matches!(source, ValidationError::Duplicate { .. }));
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(validate_page_size(6).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(MAX_PAGE_SIZE + 1).is_err());
    }
}
