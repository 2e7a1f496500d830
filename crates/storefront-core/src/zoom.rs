//! # Zoom Modal Controller
//!
//! Pan/zoom state for the product preview modal.
//!
//! ## State Machine
//! ```text
//! ┌────────────┐  open(product)   ┌──────────────────────────────────────┐
//! │   Hidden   │ ───────────────► │ Visible                              │
//! │            │ ◄─────────────── │  scale ∈ [1, 5], origin ∈ [0, 100]²  │
//! └────────────┘     close()      │                                      │
//!                                 │  wheel(dy)      scale ± 0.1, clamped │
//!                                 │  pointer_move   origin follows cursor│
//!                                 │                 (only while zoomed)  │
//!                                 │  click()        scale 1, centre      │
//!                                 └──────────────────────────────────────┘
//! ```
//!
//! Scale is kept in whole tenths so repeated wheel steps land exactly on
//! 1.0 and 5.0.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Lowest scale, in tenths (1.0×).
pub const MIN_SCALE_TENTHS: u8 = 10;

/// Highest scale, in tenths (5.0×).
pub const MAX_SCALE_TENTHS: u8 = 50;

/// One wheel notch, in tenths (0.1×).
pub const SCALE_STEP_TENTHS: u8 = 1;

// =============================================================================
// Geometry
// =============================================================================

/// Cursor position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// The image's bounding rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Zoom focal origin in percent of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalOrigin {
    pub x: f64,
    pub y: f64,
}

impl FocalOrigin {
    pub const CENTER: FocalOrigin = FocalOrigin { x: 50.0, y: 50.0 };

    /// Origin under the cursor, clamped to the image.
    ///
    /// `None` when the bounds have no area.
    pub fn under_cursor(cursor: Pointer, bounds: ImageBounds) -> Option<Self> {
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return None;
        }
        let percent_x = (cursor.x - bounds.left) / bounds.width;
        let percent_y = (cursor.y - bounds.top) / bounds.height;
        if !(percent_x.is_finite() && percent_y.is_finite()) {
            return None;
        }
        Some(FocalOrigin {
            x: (percent_x * 100.0).clamp(0.0, 100.0),
            y: (percent_y * 100.0).clamp(0.0, 100.0),
        })
    }
}

impl Default for FocalOrigin {
    fn default() -> Self {
        FocalOrigin::CENTER
    }
}

// =============================================================================
// Zoom State
// =============================================================================

/// Continuous parameters of the zoomed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    scale_tenths: u8,
    origin: FocalOrigin,
}

impl ZoomState {
    /// Scale as a factor (1.0 ..= 5.0).
    pub fn scale(&self) -> f64 {
        f64::from(self.scale_tenths) / 10.0
    }

    pub fn origin(&self) -> FocalOrigin {
        self.origin
    }

    /// True when the image is scaled above 1×.
    pub fn is_zoomed(&self) -> bool {
        self.scale_tenths > MIN_SCALE_TENTHS
    }

    /// Back to 1× around the centre.
    pub fn reset(&mut self) {
        *self = ZoomState::default();
    }

    fn step(&mut self, zoom_in: bool) {
        let next = if zoom_in {
            self.scale_tenths.saturating_add(SCALE_STEP_TENTHS)
        } else {
            self.scale_tenths.saturating_sub(SCALE_STEP_TENTHS)
        };
        self.scale_tenths = next.clamp(MIN_SCALE_TENTHS, MAX_SCALE_TENTHS);
    }

    /// CSS `transform` value, e.g. `scale(1.5)`.
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale())
    }

    /// CSS `transform-origin` value: `center center` at rest, otherwise the
    /// percentages of the focal origin.
    pub fn css_transform_origin(&self) -> String {
        if self.origin == FocalOrigin::CENTER {
            "center center".to_string()
        } else {
            format!("{}% {}%", self.origin.x, self.origin.y)
        }
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        ZoomState {
            scale_tenths: MIN_SCALE_TENTHS,
            origin: FocalOrigin::CENTER,
        }
    }
}

// =============================================================================
// Modal
// =============================================================================

/// Result of a wheel gesture over the image.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelOutcome {
    /// The scale moved (false when already at a bound).
    pub scale_changed: bool,
    /// The page must not scroll for this gesture.
    pub suppress_default: bool,
}

/// The preview modal: the bound product plus its zoom state.
#[derive(Debug, Clone, Default)]
pub struct ZoomModal {
    product: Option<Product>,
    visible: bool,
    zoom: ZoomState,
}

impl ZoomModal {
    pub fn new() -> Self {
        ZoomModal::default()
    }

    /// Shows the modal for a product with zoom reset to 1× at the centre.
    pub fn open(&mut self, product: &Product) {
        self.product = Some(product.clone());
        self.zoom.reset();
        self.visible = true;
    }

    /// Hides the modal. Zoom is left untouched; the next `open` resets it.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Moves the focal origin under the cursor.
    ///
    /// Ignored while the image is at 1×, while hidden, and for bounds with no
    /// area. Returns whether the origin moved.
    pub fn pointer_move(&mut self, cursor: Pointer, bounds: ImageBounds) -> bool {
        if !self.visible || !self.zoom.is_zoomed() {
            return false;
        }
        match FocalOrigin::under_cursor(cursor, bounds) {
            Some(origin) if origin != self.zoom.origin => {
                self.zoom.origin = origin;
                true
            }
            _ => false,
        }
    }

    /// Wheel over the image: negative `delta_y` zooms in, positive zooms out,
    /// zero leaves the scale alone. The default scroll is always suppressed.
    pub fn wheel(&mut self, delta_y: f64) -> WheelOutcome {
        let before = self.zoom.scale_tenths;
        if self.visible {
            if delta_y < 0.0 {
                self.zoom.step(true);
            } else if delta_y > 0.0 {
                self.zoom.step(false);
            }
        }
        WheelOutcome {
            scale_changed: self.zoom.scale_tenths != before,
            suppress_default: true,
        }
    }

    /// Click on the image: reset to 1× at the centre.
    pub fn click(&mut self) {
        self.zoom.reset();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Product bound by the last `open`.
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
