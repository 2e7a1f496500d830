//! # Domain Types
//!
//! Catalog records as they arrive from the static catalog file.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Product                     │
//! │  ─────────────────────────────────────────  │
//! │  id        1 | "sku-9"   (identity)         │
//! │  title     "Running Shoe"                   │
//! │  price     49.99 → Money(4999)              │
//! │  category  "shoes"                          │
//! │  image     "img/shoe.jpg"                   │
//! └─────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a catalog product.
///
/// Catalog files use either JSON integers or strings for ids. The source
/// form is kept so a stored cart writes back exactly what it read.
/// Fractional numbers are not ids; a catalog using them fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// Parses user input: integers become a numeric id, anything else a text id.
impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "product id".to_string(),
            });
        }
        Ok(s.parse::<i64>()
            .map(ProductId::Number)
            .unwrap_or_else(|_| ProductId::Text(s.to_string())))
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog. Immutable for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    #[ts(type = "number | string")]
    pub id: ProductId,

    /// Display title; the search box matches against it.
    pub title: String,

    /// Unit price (non-negative).
    #[ts(type = "number")]
    pub price: Money,

    /// Category name, compared exactly by the category filter.
    pub category: String,

    /// Image URI shown on the card and in the zoom modal.
    pub image: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_keeps_json_form() {
        let numeric: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, ProductId::Number(7));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");

        let text: ProductId = serde_json::from_str("\"sku-7\"").unwrap();
        assert_eq!(text, ProductId::Text("sku-7".to_string()));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"sku-7\"");
    }

    #[test]
    fn test_product_id_from_str() {
        assert_eq!("12".parse::<ProductId>().unwrap(), ProductId::Number(12));
        assert_eq!(
            " hat ".parse::<ProductId>().unwrap(),
            ProductId::Text("hat".to_string())
        );
        assert!("  ".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_negative_ids_and_fractional_ids() {
        let negative: ProductId = serde_json::from_str("-3").unwrap();
        assert_eq!(negative, ProductId::Number(-3));
        assert_eq!("-3".parse::<ProductId>().unwrap(), ProductId::Number(-3));

        assert!(serde_json::from_str::<ProductId>("1.5").is_err());
    }

    #[test]
    fn test_product_from_catalog_json() {
        let json = r#"{"id":1,"title":"Shoe","price":49.99,"category":"shoes","image":"shoe.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::Number(1));
        assert_eq!(product.price.cents(), 4999);
        assert_eq!(product.category, "shoes");
    }
}
