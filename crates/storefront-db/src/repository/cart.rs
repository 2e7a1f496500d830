//! # Saved Cart Repository
//!
//! Loads the cart once at startup and overwrites it after every mutation.
//!
//! ## Load Rules
//! ```text
//! stored value under "cart"
//!       │
//!       ├── missing ───────────────► empty cart
//!       ├── not a JSON line array ─► empty cart   (warn!)
//!       └── lines ─► Cart::from_lines
//!                        ├── clean ─► cart as stored
//!                        └── repaired (qty 0 / repeated id) ─► fixed cart (warn!)
//! ```

use storefront_core::{Cart, CartLine, CART_STORAGE_KEY};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::repository::storage::StorageRepository;

/// Repository for the persisted cart snapshot.
#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: StorageRepository,
}

impl CartRepository {
    pub fn new(storage: StorageRepository) -> Self {
        CartRepository { storage }
    }

    /// Restores the saved cart.
    ///
    /// Unreadable content never fails the load: it yields an empty cart.
    /// Only database errors are returned.
    pub async fn load(&self) -> DbResult<Cart> {
        let Some(json) = self.storage.get(CART_STORAGE_KEY).await? else {
            debug!("No saved cart");
            return Ok(Cart::new());
        };

        let lines: Vec<CartLine> = match serde_json::from_str(&json) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Saved cart is unreadable, starting with an empty cart");
                return Ok(Cart::new());
            }
        };

        let (cart, repaired) = Cart::from_lines(lines);
        if repaired {
            warn!(lines = cart.len(), "Saved cart had invalid lines and was repaired");
        }

        info!(lines = cart.len(), items = cart.item_count(), "Cart restored");
        Ok(cart)
    }

    /// Replaces the saved cart with `cart`.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        self.storage.set_json(CART_STORAGE_KEY, cart).await?;
        debug!(lines = cart.len(), "Cart saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use storefront_core::{Catalog, ProductId};

    use crate::pool::{Database, DbConfig};

    const CATALOG_JSON: &[u8] = br#"[
        {"id": 1, "title": "Shoe", "price": 50, "category": "shoes", "image": "shoe.jpg"},
        {"id": "hat-2", "title": "Hat", "price": 12.49, "category": "hats", "image": "hat.jpg"}
    ]"#;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_without_saved_cart() {
        let db = db().await;
        let cart = db.carts().load().await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = db().await;
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();

        let mut cart = storefront_core::Cart::new();
        let _ = cart.add(&catalog, &ProductId::Number(1)).unwrap();
        let _ = cart.add(&catalog, &ProductId::Number(1)).unwrap();
        let _ = cart.add(&catalog, &ProductId::from("hat-2")).unwrap();
        db.carts().save(&cart).await.unwrap();

        let restored = db.carts().load().await.unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total().cents(), 2 * 5000 + 1249);
    }

    #[tokio::test]
    async fn test_stored_format() {
        let db = db().await;
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();

        let mut cart = storefront_core::Cart::new();
        let _ = cart.add(&catalog, &ProductId::Number(1)).unwrap();
        db.carts().save(&cart).await.unwrap();

        let raw = db.storage().get("cart").await.unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":1,"title":"Shoe","price":50,"category":"shoes","image":"shoe.jpg","qty":1}]"#
        );
    }

    #[tokio::test]
    async fn test_clear_overwrites_with_empty_array() {
        let db = db().await;
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();

        let mut cart = storefront_core::Cart::new();
        let _ = cart.add(&catalog, &ProductId::Number(1)).unwrap();
        db.carts().save(&cart).await.unwrap();

        let _ = cart.clear();
        db.carts().save(&cart).await.unwrap();

        assert_eq!(db.storage().get("cart").await.unwrap().as_deref(), Some("[]"));
        assert!(db.carts().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cart_loads_empty() {
        let db = db().await;
        db.storage().set("cart", "{definitely not a cart").await.unwrap();
        assert!(db.carts().load().await.unwrap().is_empty());

        db.storage().set("cart", r#"[{"id":1,"qty":-3}]"#).await.unwrap();
        assert!(db.carts().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_lines_are_repaired() {
        let db = db().await;
        db.storage()
            .set(
                "cart",
                r#"[
                    {"id":1,"title":"Shoe","price":50,"category":"shoes","image":"s.jpg","qty":1},
                    {"id":2,"title":"Cap","price":5,"category":"hats","image":"c.jpg","qty":0},
                    {"id":1,"title":"Shoe","price":50,"category":"shoes","image":"s.jpg","qty":2}
                ]"#,
            )
            .await
            .unwrap();

        let cart = db.carts().load().await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&ProductId::Number(1)).unwrap().qty, 3);
    }
}
