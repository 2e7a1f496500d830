//! # Repository Module
//!
//! ```text
//! Command handler
//!      │  db.carts().save(&cart)
//!      ▼
//! CartRepository ── JSON snapshot ──► StorageRepository ── SQL ──► local_storage
//! ```
//!
//! ## Available Repositories
//!
//! - [`StorageRepository`] - Key/value get and set
//! - [`CartRepository`] - Saved cart load/save

pub mod cart;
pub mod storage;

pub use cart::CartRepository;
pub use storage::StorageRepository;
