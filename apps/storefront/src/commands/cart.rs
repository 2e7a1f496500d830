//! # Cart Commands
//!
//! Cart mutations with save-after-mutate persistence.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add / increment /        │
//! │  │  Cart    │                │          │───┘ decrement                │
//! │  └──────────┘◄───────────────└──────────┘                              │
//! │       ▲        clear_cart,                                              │
//! │       │        last line decremented                                    │
//! │       │                                                                 │
//! │  restored from storage at startup                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler that changes the cart writes the full snapshot before it
//! returns, so the next command always reads what was saved. A failed write
//! restores the previous lines.

use storefront_core::{Cart, CartChange, Catalog, CoreResult};
use tracing::{debug, error};

use crate::commands::product::resolve_product_id;
use crate::error::ApiError;
use crate::state::{AppState, CartResponse, CartState, DbState};

/// Gets the current cart contents.
pub fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    state
        .cart
        .with_cart(|cart| CartResponse::build(cart, &state.config))
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: a new line copied from the catalog product is appended
/// - Unknown id: `NOT_FOUND`, cart unchanged
pub async fn add_to_cart(state: &mut AppState, product_id: &str) -> Result<CartResponse, ApiError> {
    let product_id = resolve_product_id(state, product_id)?;
    debug!(product_id = %product_id, "add_to_cart command");

    let empty = Catalog::default();
    let catalog = state.catalog.catalog().unwrap_or(&empty);

    commit(&mut state.cart, &state.db, |cart| cart.add(catalog, &product_id)).await?;
    Ok(get_cart(state))
}

/// Quantity + 1 for a line already in the cart. Absent lines are ignored.
pub async fn increment_item(state: &mut AppState, product_id: &str) -> Result<CartResponse, ApiError> {
    let product_id = resolve_product_id(state, product_id)?;
    debug!(product_id = %product_id, "increment_item command");

    commit(&mut state.cart, &state.db, |cart| cart.increment(&product_id)).await?;
    Ok(get_cart(state))
}

/// Quantity − 1; the line is removed when it would reach zero. Absent lines
/// are ignored.
pub async fn decrement_item(state: &mut AppState, product_id: &str) -> Result<CartResponse, ApiError> {
    let product_id = resolve_product_id(state, product_id)?;
    debug!(product_id = %product_id, "decrement_item command");

    commit(&mut state.cart, &state.db, |cart| Ok(cart.decrement(&product_id))).await?;
    Ok(get_cart(state))
}

/// Removes all lines.
pub async fn clear_cart(state: &mut AppState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    commit(&mut state.cart, &state.db, |cart| Ok(cart.clear())).await?;
    Ok(get_cart(state))
}

/// Applies `mutation` and writes the snapshot when it changed the cart.
///
/// The cart is all-or-nothing: when the mutation fails or the write fails,
/// the previous lines are put back, so an error always means nothing changed.
async fn commit<F>(cart: &mut CartState, db: &DbState, mutation: F) -> Result<(), ApiError>
where
    F: FnOnce(&mut Cart) -> CoreResult<CartChange>,
{
    let previous = cart.cart().clone();

    let change = match cart.with_cart_mut(mutation) {
        Ok(change) => change,
        Err(e) => {
            cart.restore(previous);
            return Err(e.into());
        }
    };

    if !change.is_changed() {
        debug!("Cart unchanged, skipping save");
        return Ok(());
    }

    debug!(?change, "Saving cart");
    if let Err(e) = db.inner().carts().save(cart.cart()).await {
        error!(error = %e, "Cart could not be saved, changes rolled back");
        cart.restore(previous);
        return Err(e.into());
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{app_state, app_state_with};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_twice_gives_one_line_and_is_saved() {
        let mut state = app_state().await;

        add_to_cart(&mut state, "1").await.unwrap();
        let response = add_to_cart(&mut state, "1").await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "1");
        assert_eq!(response.items[0].qty, 2);
        assert_eq!(response.totals.total, "$100.00");

        let saved = state.db.inner().carts().load().await.unwrap();
        assert_eq!(saved.lines()[0].qty, 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let mut state = app_state().await;
        let err = add_to_cart(&mut state, "999").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&state).is_empty());
        assert_eq!(state.db.inner().storage().get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decrement_removes_line_at_one() {
        let mut state = app_state().await;
        add_to_cart(&mut state, "1").await.unwrap();
        add_to_cart(&mut state, "2").await.unwrap();
        add_to_cart(&mut state, "2").await.unwrap();

        let response = decrement_item(&mut state, "2").await.unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[1].qty, 1);

        let response = decrement_item(&mut state, "1").await.unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "2");

        let saved = state.db.inner().carts().load().await.unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_and_decrement_absent_lines_do_nothing() {
        let mut state = app_state().await;
        assert!(increment_item(&mut state, "3").await.unwrap().is_empty());
        assert!(decrement_item(&mut state, "3").await.unwrap().is_empty());
        // No-ops never touch storage.
        assert_eq!(state.db.inner().storage().get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_saves_empty_cart() {
        let mut state = app_state().await;
        add_to_cart(&mut state, "4").await.unwrap();
        increment_item(&mut state, "4").await.unwrap();

        let response = clear_cart(&mut state).await.unwrap();
        assert!(response.is_empty());
        assert_eq!(response.totals.total, "$0.00");
        assert_eq!(
            state.db.inner().storage().get("cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_restored_line_grows_without_catalog() {
        let mut state = app_state_with(b"not a catalog").await;
        state
            .db
            .inner()
            .storage()
            .set(
                "cart",
                r#"[{"id":5,"title":"Old","price":2.5,"category":"misc","image":"o.jpg","qty":1}]"#,
            )
            .await
            .unwrap();
        let restored = state.db.inner().carts().load().await.unwrap();
        state.cart = crate::state::CartState::new(restored);

        let response = add_to_cart(&mut state, "5").await.unwrap();
        assert_eq!(response.items[0].qty, 2);
        assert_eq!(response.totals.total, "$5.00");

        let err = add_to_cart(&mut state, "6").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back() {
        let mut state = app_state().await;
        add_to_cart(&mut state, "2").await.unwrap();
        state.db.inner().close().await;

        let err = add_to_cart(&mut state, "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        let err = increment_item(&mut state, "2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        let err = clear_cart(&mut state).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let response = get_cart(&state);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "2");
        assert_eq!(response.items[0].qty, 1);
    }

    #[tokio::test]
    async fn test_failed_save_of_first_add_leaves_cart_empty() {
        let mut state = app_state().await;
        state.db.inner().close().await;

        assert!(add_to_cart(&mut state, "1").await.is_err());
        assert!(get_cart(&state).is_empty());
    }

    #[tokio::test]
    async fn test_blank_id_is_validation_error() {
        let mut state = app_state().await;
        let err = add_to_cart(&mut state, "   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
