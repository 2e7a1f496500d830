//! # Cart Manager
//!
//! The shopping cart and its pure mutations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action            Operation             Cart Change               │
//! │  ───────────            ─────────             ───────────               │
//! │                                                                         │
//! │  Add to Cart ─────────► add(catalog, id) ───► qty+1 or push new line   │
//! │                                                                         │
//! │  Plus ────────────────► increment(id) ──────► qty+1                    │
//! │                                                                         │
//! │  Minus ───────────────► decrement(id) ──────► qty-1, remove at 0       │
//! │                                                                         │
//! │  Clear ───────────────► clear() ────────────► no lines                 │
//! │                                                                         │
//! │  Every operation returns a CartChange. The caller persists the cart    │
//! │  whenever the change is not `Unchanged`, before serving any read.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's aggregated entry in the cart.
///
/// ## Snapshot Pattern
/// Product fields are copied when the line is created. The stored form is the
/// product record plus `qty`:
/// `{"id":1,"title":"Shoe","price":50,"category":"shoes","image":"shoe.jpg","qty":2}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    /// Always at least 1 while the line is in a cart.
    pub qty: u32,
}

impl CartLine {
    /// New line for a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            qty: 1,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.qty)
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// What a cart operation did.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with qty 1.
    Added(ProductId),
    /// An existing line's quantity changed; carries the new quantity.
    QuantityChanged { product_id: ProductId, qty: u32 },
    /// A line reached qty 0 and was removed.
    Removed(ProductId),
    /// All lines were removed.
    Cleared,
    /// Nothing happened (line absent).
    Unchanged,
}

impl CartChange {
    /// Whether the cart must be persisted after this change.
    pub fn is_changed(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id
/// - Every line has `qty >= 1`
/// - Lines keep the order of their first add
/// - The total is always derived from the lines, never stored
///
/// Serializes transparently as the JSON array of its lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from stored lines, restoring the invariants.
    ///
    /// Lines with `qty == 0` are dropped. Repeated ids are merged into the
    /// first occurrence by summing quantities (saturating).
    ///
    /// Returns the cart and whether anything had to be repaired.
    pub fn from_lines(lines: Vec<CartLine>) -> (Self, bool) {
        let mut repaired = false;
        let mut cart = Cart::new();

        for line in lines {
            if line.qty == 0 {
                repaired = true;
                continue;
            }
            match cart.position(line.id()) {
                Some(index) => {
                    let existing = &mut cart.lines[index];
                    existing.qty = existing.qty.saturating_add(line.qty);
                    repaired = true;
                }
                None => cart.lines.push(line),
            }
        }

        (cart, repaired)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Line already present: quantity + 1 (the catalog is not consulted)
    /// - Otherwise: the product is looked up and a new line is appended
    ///
    /// ## Returns
    /// * `Err(CoreError::ProductNotFound)` - id not in the catalog; cart unchanged
    /// * `Err(CoreError::QuantityOverflow)` - line quantity at its maximum
    pub fn add(&mut self, catalog: &Catalog, product_id: &ProductId) -> CoreResult<CartChange> {
        if self.position(product_id).is_some() {
            return self.increment(product_id);
        }

        let product = catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.lines.push(CartLine::from_product(product));
        Ok(CartChange::Added(product_id.clone()))
    }

    /// Quantity + 1 for an existing line. No-op when the line is absent.
    pub fn increment(&mut self, product_id: &ProductId) -> CoreResult<CartChange> {
        let Some(index) = self.position(product_id) else {
            return Ok(CartChange::Unchanged);
        };

        let line = &mut self.lines[index];
        line.qty = line.qty.checked_add(1).ok_or_else(|| CoreError::QuantityOverflow {
            product_id: product_id.to_string(),
        })?;

        Ok(CartChange::QuantityChanged {
            product_id: product_id.clone(),
            qty: line.qty,
        })
    }

    /// Quantity − 1; the line is removed instead of reaching 0.
    /// No-op when the line is absent.
    pub fn decrement(&mut self, product_id: &ProductId) -> CartChange {
        let Some(index) = self.position(product_id) else {
            return CartChange::Unchanged;
        };

        if self.lines[index].qty > 1 {
            let line = &mut self.lines[index];
            line.qty -= 1;
            CartChange::QuantityChanged {
                product_id: product_id.clone(),
                qty: line.qty,
            }
        } else {
            self.lines.remove(index);
            CartChange::Removed(product_id.clone())
        }
    }

    /// Removes all lines. Always reported as a change so the empty cart is
    /// written through.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();
        CartChange::Cleared
    }

    /// Σ price × qty over all lines; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| line.qty as u64).sum()
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
