//! # storefront-core: Pure Storefront Logic
//!
//! Catalog lookups, the filter/sort/paginate engine, cart math and the zoom
//! modal state machine. Nothing in this crate touches the file system, the
//! database or the terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View (apps/storefront)                       │   │
//! │  │    Grid ──► Load More ──► Cart Panel ──► Zoom Modal             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  filter   │  │   cart    │  │   zoom    │  │   │
//! │  │   │  Catalog  │  │ Criteria  │  │   Cart    │  │ ZoomModal │  │   │
//! │  │   │  Product  │  │ Paginate  │  │ CartLine  │  │ ZoomState │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-db (Persistence Layer)                 │   │
//! │  │              key/value storage, saved cart                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product records and ids
//! - [`money`] - Integer-cent money
//! - [`catalog`] - The session-immutable product list
//! - [`filter`] - Search, category, sort and pagination
//! - [`cart`] - Cart lines, quantities and totals
//! - [`zoom`] - Preview modal pan/zoom
//! - [`error`] - Domain error types
//! - [`validation`] - Record and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::catalog::Catalog;
//! use storefront_core::filter::{compute_visible, FilterCriteria, PaginationState};
//!
//! let json = br#"[
//!     {"id":1,"title":"Shoe","price":50,"category":"shoes","image":"shoe.jpg"},
//!     {"id":2,"title":"Shirt","price":20,"category":"clothes","image":"shirt.jpg"}
//! ]"#;
//! let catalog = Catalog::from_json(json).unwrap();
//!
//! let criteria = FilterCriteria {
//!     search_text: "sh".to_string(),
//!     ..FilterCriteria::default()
//! };
//! let visible = compute_visible(catalog.products(), &criteria, &PaginationState::default());
//! assert_eq!(visible.filtered_count, 2);
//! assert!(!visible.has_more);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;
pub mod zoom;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartLine};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{CategoryFilter, FilterCriteria, PaginationState, SortOrder, VisibleProducts};
pub use money::Money;
pub use types::*;
pub use zoom::{ZoomModal, ZoomState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Storage key the cart is saved under.
pub const CART_STORAGE_KEY: &str = "cart";
