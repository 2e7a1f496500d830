//! # State Module
//!
//! Application state, owned by the controller for the whole session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                           AppState                                      │
//! │          ┌──────────┬──────────┼──────────┬──────────┬──────────┐      │
//! │          ▼          ▼          ▼          ▼          ▼          ▼       │
//! │  ┌────────────┐┌──────────┐┌─────────┐┌─────────┐┌─────────┐┌───────┐ │
//! │  │ConfigState ││ Catalog  ││ Browse  ││  Cart   ││ZoomModal││DbState│ │
//! │  │ read-only  ││  State   ││  State  ││  State  ││         ││       │ │
//! │  │            ││Ready /   ││criteria ││ lines   ││ scale   ││ pool  │ │
//! │  │            ││Unavail.  ││ + page  ││         ││ origin  ││       │ │
//! │  └────────────┘└──────────┘└─────────┘└─────────┘└─────────┘└───────┘ │
//! │                                                                         │
//! │  Single-threaded: commands take `&AppState` or `&mut AppState`.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod browse;
mod cart;
mod catalog;
mod config;
mod db;

pub use browse::BrowseState;
pub use cart::{CartLineView, CartResponse, CartState, CartTotals};
pub use catalog::CatalogState;
pub use config::{ConfigState, DEFAULT_CATALOG_PATH, ENV_CATALOG, ENV_DB_PATH, ENV_PAGE_SIZE};
pub use db::DbState;

use storefront_core::{Cart, ZoomModal};

/// Everything a command handler can read or change.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub browse: BrowseState,
    pub cart: CartState,
    pub modal: ZoomModal,
    pub db: DbState,
}

impl AppState {
    /// Assembles the state from the startup results.
    pub fn new(config: ConfigState, catalog: CatalogState, cart: Cart, db: DbState) -> Self {
        AppState {
            browse: BrowseState::new(config.page_size),
            config,
            catalog,
            cart: CartState::new(cart),
            modal: ZoomModal::new(),
            db,
        }
    }
}
