//! # Commands Module
//!
//! Every operation the view can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Grid, categories, search/category/sort, load more
//! ├── cart.rs     ◄─── Cart manipulation (persisted)
//! └── modal.rs    ◄─── Preview modal open/close and zoom
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell: "add 3"  ──►  Action::Add("3")                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&mut AppState, "3")                       │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render::cart(&CartResponse)  ──►  text on stdout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take the state they need by reference. Read-only handlers take
//! `&AppState`; anything that changes state takes `&mut AppState`.

pub mod cart;
pub mod modal;
pub mod product;
