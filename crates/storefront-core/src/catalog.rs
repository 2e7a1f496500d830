//! # Catalog Store
//!
//! The immutable product list loaded once at startup.
//!
//! Products keep their file order; the filter engine relies on it for the
//! unsorted view and for stable tie-breaking when sorting by price.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};
use crate::validation::validate_catalog;

/// Session-immutable catalog with an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from already decoded records.
    ///
    /// ## Returns
    /// * `Err(CoreError::InvalidProduct)` - a record is invalid or an id repeats
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        validate_catalog(&products)?;

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();

        Ok(Catalog { products, index })
    }

    /// Decodes and validates a catalog document (a JSON array of products).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::catalog::Catalog;
    ///
    /// let json = br#"[{"id":1,"title":"Shoe","price":50,"category":"shoes","image":"shoe.jpg"}]"#;
    /// let catalog = Catalog::from_json(json).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json(bytes: &[u8]) -> CoreResult<Self> {
        let products: Vec<Product> =
            serde_json::from_slice(bytes).map_err(|e| CoreError::CatalogFormat(e.to_string()))?;
        Catalog::new(products)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order, for the category selector.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
