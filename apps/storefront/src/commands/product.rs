//! # Product Commands
//!
//! Grid, category selector and criteria changes.
//!
//! ## Grid Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search <text> / category <name> / sort <order>                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  BrowseState updates criteria, page back to 1                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  compute_visible(catalog, criteria, pagination)                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  GridResponse { items, filteredCount, hasMore, noResults }             │
//! │                                                                         │
//! │  more ──► one more page, only while hasMore                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CategoryFilter, Product, ProductId, SortOrder};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{AppState, ConfigState};

// =============================================================================
// Response DTOs
// =============================================================================

/// A product card in the grid or the preview modal.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    /// Formatted with the configured currency.
    pub price: String,
    #[ts(type = "number")]
    pub price_cents: i64,
    pub category: String,
    pub image: String,
}

impl ProductCard {
    pub fn build(product: &Product, config: &ConfigState) -> Self {
        ProductCard {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: config.format_money(product.price),
            price_cents: product.price.cents(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

/// The visible product grid.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub items: Vec<ProductCard>,
    #[ts(type = "number")]
    pub filtered_count: usize,
    pub has_more: bool,
    /// Nothing matched the criteria; the view shows "No products found."
    pub no_results: bool,
    pub page: u32,
}

/// Options for the category selector.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    /// `"all"` followed by the catalog's categories in first-seen order.
    pub options: Vec<String>,
    pub selected: String,
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the grid for the current criteria and page.
pub fn get_grid(state: &AppState) -> Result<GridResponse, ApiError> {
    let catalog = state.catalog.require()?;
    let visible = state.browse.visible(catalog.products());

    Ok(GridResponse {
        items: visible
            .items
            .iter()
            .map(|product| ProductCard::build(product, &state.config))
            .collect(),
        filtered_count: visible.filtered_count,
        has_more: visible.has_more,
        no_results: visible.is_no_results(),
        page: state.browse.pagination().current_page(),
    })
}

/// Lists the category selector options.
pub fn get_categories(state: &AppState) -> Result<CategoriesResponse, ApiError> {
    let catalog = state.catalog.require()?;

    let mut options = vec![CategoryFilter::ALL.to_string()];
    options.extend(catalog.categories().into_iter().map(str::to_string));

    Ok(CategoriesResponse {
        options,
        selected: state.browse.criteria().category.to_string(),
    })
}

/// Sets the search text (case-insensitive title substring; empty clears).
pub fn set_search(state: &mut AppState, text: &str) -> Result<GridResponse, ApiError> {
    debug!(text = %text, "set_search command");
    state.browse.set_search(text);
    get_grid(state)
}

/// Sets the category filter. `all` removes it.
pub fn set_category(state: &mut AppState, category: &str) -> Result<GridResponse, ApiError> {
    debug!(category = %category, "set_category command");
    let category = category.trim();
    if category.is_empty() {
        return Err(ApiError::validation("category is required"));
    }
    state.browse.set_category(CategoryFilter::from(category));
    get_grid(state)
}

/// Sets the sort order: `none`, `low-high` or `high-low`.
pub fn set_sort(state: &mut AppState, sort_order: &str) -> Result<GridResponse, ApiError> {
    debug!(sort_order = %sort_order, "set_sort command");
    let sort_order: SortOrder = sort_order.parse()?;
    state.browse.set_sort(sort_order);
    get_grid(state)
}

/// "Load more": reveals the next page if there is one.
pub fn load_more(state: &mut AppState) -> Result<GridResponse, ApiError> {
    debug!("load_more command");
    let catalog = state.catalog.require()?;
    state.browse.load_more(catalog.products());
    get_grid(state)
}

// =============================================================================
// Id Resolution
// =============================================================================

/// Resolves a typed product id.
///
/// Digits parse as a numeric id first. When only a text id with the same
/// spelling exists (in the catalog or the cart), that one is used instead.
pub fn resolve_product_id(state: &AppState, raw: &str) -> Result<ProductId, ApiError> {
    let parsed: ProductId = raw.parse()?;

    let known = |id: &ProductId| {
        state.catalog.catalog().is_some_and(|c| c.contains(id)) || state.cart.cart().line(id).is_some()
    };

    if let ProductId::Number(_) = parsed {
        if !known(&parsed) {
            let text = ProductId::Text(raw.trim().to_string());
            if known(&text) {
                return Ok(text);
            }
        }
    }

    Ok(parsed)
}

// =============================================================================
// Tests
// =============================================================================
