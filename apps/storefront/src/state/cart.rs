//! # Cart State
//!
//! The session's cart plus the display-ready views built from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User Action          Command              Cart Change      Storage    │
//! │  ───────────          ───────              ───────────      ───────    │
//! │  add <id> ──────────► add_to_cart() ─────► qty+1 / push ──► save      │
//! │  inc <id> ──────────► increment_item() ──► qty+1 ─────────► save      │
//! │  dec <id> ──────────► decrement_item() ──► qty-1 / remove ► save      │
//! │  clear ─────────────► clear_cart() ──────► no lines ──────► save      │
//! │  cart ──────────────► get_cart() ────────► (read only)                 │
//! │                                                                         │
//! │  Unchanged results skip the save.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{Cart, CartLine};
use ts_rs::TS;

use crate::state::ConfigState;

/// Owner of the session's cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Cart,
}

impl CartState {
    pub fn new(cart: Cart) -> Self {
        CartState { cart }
    }

    /// Executes a read-only closure with the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.cart)
    }

    /// Executes a mutating closure with the cart.
    pub fn with_cart_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        f(&mut self.cart)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Puts back a snapshot taken before a mutation.
    pub fn restore(&mut self, cart: Cart) {
        self.cart = cart;
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

/// One cart row as the view shows it.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub qty: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl CartLineView {
    fn build(line: &CartLine, config: &ConfigState) -> Self {
        CartLineView {
            product_id: line.id().to_string(),
            title: line.product.title.clone(),
            image: line.product.image.clone(),
            qty: line.qty,
            unit_price: config.format_money(line.product.price),
            subtotal: config.format_money(line.subtotal()),
        }
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: u32,
    /// Sum of quantities.
    #[ts(type = "number")]
    pub item_count: u64,
    #[ts(type = "number")]
    pub total_cents: i64,
    /// `total_cents` formatted with the configured currency.
    pub total: String,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn build(cart: &Cart, config: &ConfigState) -> Self {
        let total = cart.total();
        CartResponse {
            items: cart
                .lines()
                .iter()
                .map(|line| CartLineView::build(line, config))
                .collect(),
            totals: CartTotals {
                line_count: u32::try_from(cart.len()).unwrap_or(u32::MAX),
                item_count: cart.item_count(),
                total_cents: total.cents(),
                total: config.format_money(total),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Catalog, ProductId};

    #[test]
    fn test_response_formats_money() {
        let catalog = Catalog::from_json(
            br#"[
                {"id":1,"title":"Shoe","price":49.99,"category":"shoes","image":"s.jpg"},
                {"id":2,"title":"Sock","price":3,"category":"socks","image":"k.jpg"}
            ]"#,
        )
        .unwrap();

        let mut state = CartState::default();
        state.with_cart_mut(|cart| {
            let _ = cart.add(&catalog, &ProductId::Number(1)).unwrap();
            let _ = cart.add(&catalog, &ProductId::Number(2)).unwrap();
            let _ = cart.add(&catalog, &ProductId::Number(2)).unwrap();
        });

        let response = state.with_cart(|cart| CartResponse::build(cart, &ConfigState::default()));
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[1].qty, 2);
        assert_eq!(response.items[1].subtotal, "$6.00");
        assert_eq!(response.totals.item_count, 3);
        assert_eq!(response.totals.total_cents, 5599);
        assert_eq!(response.totals.total, "$55.99");
    }

    #[test]
    fn test_empty_cart_response() {
        let response = CartResponse::build(&Cart::new(), &ConfigState::default());
        assert!(response.is_empty());
        assert_eq!(response.totals.total, "$0.00");
    }
}
