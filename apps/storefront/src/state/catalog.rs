//! # Catalog State
//!
//! The catalog as loaded at startup, or the reason it is unavailable.
//!
//! ```text
//! read product.json ──► Catalog::from_json ──► Ready(catalog)
//!        │                     │
//!        └── I/O error ────────┴── format / validation error ──► Unavailable
//! ```

use std::path::Path;

use storefront_core::Catalog;
use tracing::{info, warn};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum CatalogState {
    Ready(Catalog),
    Unavailable { reason: String },
}

impl CatalogState {
    /// Reads and validates the catalog file. Never fails: any problem turns
    /// into `Unavailable`.
    pub async fn load(path: &Path) -> Self {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Catalog file could not be read");
                return CatalogState::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        CatalogState::from_bytes(&bytes)
    }

    /// Decodes an already read catalog document.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match Catalog::from_json(bytes) {
            Ok(catalog) => {
                info!(products = catalog.len(), "Catalog loaded");
                CatalogState::Ready(catalog)
            }
            Err(e) => {
                warn!(error = %e, "Catalog rejected");
                CatalogState::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogState::Ready(_))
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Ready(catalog) => Some(catalog),
            CatalogState::Unavailable { .. } => None,
        }
    }

    /// The catalog, or the `CATALOG_UNAVAILABLE` error for commands that
    /// cannot work without it.
    pub fn require(&self) -> Result<&Catalog, ApiError> {
        self.catalog().ok_or_else(ApiError::catalog_unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_valid_catalog_is_ready() {
        let state = CatalogState::from_bytes(
            br#"[{"id":1,"title":"Shoe","price":50,"category":"shoes","image":"s.jpg"}]"#,
        );
        assert!(state.is_ready());
        assert_eq!(state.require().unwrap().len(), 1);
    }

    #[test]
    fn test_negative_price_makes_catalog_unavailable() {
        let state = CatalogState::from_bytes(
            br#"[{"id":1,"title":"Shoe","price":-5,"category":"shoes","image":"s.jpg"}]"#,
        );
        assert!(!state.is_ready());
        assert_eq!(state.require().unwrap_err().code, ErrorCode::CatalogUnavailable);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let state = CatalogState::load(Path::new("/definitely/not/here/product.json")).await;
        assert!(matches!(state, CatalogState::Unavailable { .. }));
    }
}
