//! # Preview Modal Commands
//!
//! Opening a product preview and driving its pan/zoom.
//!
//! The text view has no real image element, so pointer coordinates are
//! given against [`PREVIEW_BOUNDS`], a 100 × 100 box at the origin: `move 25 75`
//! points at 25% across and 75% down.

use serde::Serialize;
use storefront_core::zoom::{ImageBounds, Pointer};
use tracing::debug;
use ts_rs::TS;

use crate::commands::product::{resolve_product_id, ProductCard};
use crate::error::ApiError;
use crate::state::AppState;

/// Image rectangle used for pointer commands.
pub const PREVIEW_BOUNDS: ImageBounds = ImageBounds {
    left: 0.0,
    top: 0.0,
    width: 100.0,
    height: 100.0,
};

/// Modal contents and the CSS values the view applies to the image.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModalResponse {
    pub visible: bool,
    pub product: Option<ProductCard>,
    pub scale: f64,
    /// e.g. `scale(1.5)`
    pub transform: String,
    /// `center center` or `x% y%`
    pub transform_origin: String,
    /// The gesture must not scroll the page.
    pub suppress_scroll: bool,
}

fn respond(state: &AppState, suppress_scroll: bool) -> ModalResponse {
    let zoom = state.modal.zoom();
    ModalResponse {
        visible: state.modal.is_visible(),
        product: state
            .modal
            .product()
            .map(|product| ProductCard::build(product, &state.config)),
        scale: zoom.scale(),
        transform: zoom.css_transform(),
        transform_origin: zoom.css_transform_origin(),
        suppress_scroll,
    }
}

/// Gets the modal state.
pub fn get_modal(state: &AppState) -> ModalResponse {
    respond(state, false)
}

/// Opens the preview for a catalog product with zoom reset.
pub fn open_preview(state: &mut AppState, product_id: &str) -> Result<ModalResponse, ApiError> {
    let product_id = resolve_product_id(state, product_id)?;
    debug!(product_id = %product_id, "open_preview command");

    let catalog = state.catalog.require()?;
    let product = catalog
        .get(&product_id)
        .ok_or_else(|| ApiError::not_found("Product", &product_id.to_string()))?;

    state.modal.open(product);
    Ok(get_modal(state))
}

/// Moves the focal origin under the pointer (only while zoomed in).
pub fn pointer_move(state: &mut AppState, x: f64, y: f64) -> ModalResponse {
    let moved = state.modal.pointer_move(Pointer { x, y }, PREVIEW_BOUNDS);
    debug!(x, y, moved, "pointer_move command");
    get_modal(state)
}

/// Wheel over the image: negative `delta_y` zooms in, positive zooms out.
pub fn wheel(state: &mut AppState, delta_y: f64) -> ModalResponse {
    let outcome = state.modal.wheel(delta_y);
    debug!(delta_y, scale = state.modal.zoom().scale(), "wheel command");
    respond(state, outcome.suppress_default)
}

/// Click on the image: back to 1× at the centre.
pub fn click(state: &mut AppState) -> ModalResponse {
    debug!("click command");
    state.modal.click();
    get_modal(state)
}

/// Hides the modal.
pub fn close_preview(state: &mut AppState) -> ModalResponse {
    debug!("close_preview command");
    state.modal.close();
    get_modal(state)
}
