//! # Database State
//!
//! Wraps the `Database` handle used by the cart commands.

use storefront_db::Database;

/// Wrapper around `Database` owned by the app state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// db_state.inner().carts().save(&cart).await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
