//! # Browse State
//!
//! The current search, category and sort selection plus "load more"
//! progress. Any change to the selection starts again at page 1.

use storefront_core::filter::compute_visible;
use storefront_core::{CategoryFilter, FilterCriteria, PaginationState, Product, SortOrder, VisibleProducts};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    criteria: FilterCriteria,
    pagination: PaginationState,
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        BrowseState {
            criteria: FilterCriteria::default(),
            pagination: PaginationState::new(page_size),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.pagination.reset();
        debug!(search = %self.criteria.search_text, "Search changed");
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
        self.pagination.reset();
        debug!(category = %self.criteria.category, "Category changed");
    }

    pub fn set_sort(&mut self, sort_order: SortOrder) {
        self.criteria.sort_order = sort_order;
        self.pagination.reset();
        debug!(sort = %sort_order, "Sort order changed");
    }

    /// Grid for the current selection.
    pub fn visible<'a>(&self, products: &'a [Product]) -> VisibleProducts<'a> {
        compute_visible(products, &self.criteria, &self.pagination)
    }

    /// Reveals one more page when there is more to show.
    ///
    /// Returns whether the page advanced.
    pub fn load_more(&mut self, products: &[Product]) -> bool {
        if !self.visible(products).has_more {
            return false;
        }
        self.pagination.advance();
        debug!(page = self.pagination.current_page(), "Loaded more products");
        true
    }
}
