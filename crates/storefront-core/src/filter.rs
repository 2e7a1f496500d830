//! # Filter / Sort / Pagination Engine
//!
//! Pure computation of the product grid from the catalog and the current
//! user selection.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compute_visible                                  │
//! │                                                                         │
//! │  catalog (never mutated)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. search text   lower(title) contains lower(search)   (if non-empty) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. category      category == selected                  (unless "all") │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. sort          stable by price: low-high | high-low | none          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. paginate      first page × page_size items, has_more flag          │
//! │                                                                         │
//! │  Order is fixed: it decides tie-breaks and compound filters.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Product;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Criteria
// =============================================================================

/// Category selector value. `"all"` disables the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    /// Exact, case-sensitive match.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == CategoryFilter::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => CategoryFilter::ALL.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(CategoryFilter::ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Price sort order selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    #[serde(rename = "none")]
    Unsorted,
    LowHigh,
    HighLow,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Unsorted => "none",
            SortOrder::LowHigh => "low-high",
            SortOrder::HighLow => "high-low",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(SortOrder::Unsorted),
            "low-high" => Ok(SortOrder::LowHigh),
            "high-low" => Ok(SortOrder::HighLow),
            _ => Err(ValidationError::NotAllowed {
                field: "sort order".to_string(),
                allowed: vec!["none".into(), "low-high".into(), "high-low".into()],
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current search, category, and sort selection.
///
/// Stateless: rebuilt from the controls each time the grid renders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_text: String,
    #[ts(type = "string")]
    pub category: CategoryFilter,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    /// Search-text test: case-insensitive substring of the title.
    fn matches_search(needle: &str, product: &Product) -> bool {
        needle.is_empty() || product.title.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Incremental "load more" pagination.
///
/// ## Invariants
/// - `current_page >= 1`
/// - `page_size >= 1`, fixed for the lifetime of the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    page_size: usize,
}

impl PaginationState {
    /// Starts at page 1. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        PaginationState {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Pagination positioned at `page` (raised to 1 if zero).
    pub fn at_page(page_size: usize, page: u32) -> Self {
        PaginationState {
            current_page: page.max(1),
            ..PaginationState::new(page_size)
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Maximum number of items revealed so far.
    pub fn visible_limit(&self) -> usize {
        (self.current_page as usize).saturating_mul(self.page_size)
    }

    /// "Load more": reveal one more page.
    pub fn advance(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Back to page 1 (criteria changed).
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState::new(DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// Visible Products
// =============================================================================

/// Display-ready grid contents.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleProducts<'a> {
    /// Products to render, in display order.
    pub items: Vec<&'a Product>,
    /// Number of products that passed the filters (before pagination).
    pub filtered_count: usize,
    /// Whether "load more" would reveal further products.
    pub has_more: bool,
}

impl VisibleProducts<'_> {
    /// Nothing matched: the view shows its "no results" state instead of an
    /// empty grid.
    pub fn is_no_results(&self) -> bool {
        self.items.is_empty()
    }
}

/// Applies search, category, and sort to the catalog (steps 1-3).
pub fn filter_and_sort<'a>(catalog: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.search_text.to_lowercase();

    let mut filtered: Vec<&Product> = catalog
        .iter()
        .filter(|product| FilterCriteria::matches_search(&needle, product))
        .filter(|product| criteria.category.matches(&product.category))
        .collect();

    // sort_by is stable: equal prices keep their catalog order.
    match criteria.sort_order {
        SortOrder::Unsorted => {}
        SortOrder::LowHigh => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::HighLow => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    filtered
}

/// Computes the visible grid for the given criteria and pagination.
///
/// Pure and deterministic: identical inputs always give identical output.
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::Catalog;
/// use storefront_core::filter::{compute_visible, FilterCriteria, PaginationState, SortOrder};
///
/// let catalog = Catalog::from_json(br#"[
///     {"id":1,"title":"Shoe","price":50,"category":"shoes","image":"a.jpg"},
///     {"id":2,"title":"Shirt","price":20,"category":"clothes","image":"b.jpg"}
/// ]"#).unwrap();
///
/// let criteria = FilterCriteria { sort_order: SortOrder::LowHigh, ..Default::default() };
/// let visible = compute_visible(catalog.products(), &criteria, &PaginationState::new(6));
///
/// let titles: Vec<&str> = visible.items.iter().map(|p| p.title.as_str()).collect();
/// assert_eq!(titles, ["Shirt", "Shoe"]);
/// assert!(!visible.has_more);
/// ```
pub fn compute_visible<'a>(
    catalog: &'a [Product],
    criteria: &FilterCriteria,
    pagination: &PaginationState,
) -> VisibleProducts<'a> {
    let mut items = filter_and_sort(catalog, criteria);
    let filtered_count = items.len();

    items.truncate(pagination.visible_limit());
    let has_more = filtered_count > items.len();

    VisibleProducts {
        items,
        filtered_count,
        has_more,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductId;

    fn product(id: i64, title: &str, cents: i64, category: &str) -> Product {
        Product {
            id: ProductId::Number(id),
            title: title.to_string(),
            price: Money::from_cents(cents),
            category: category.to_string(),
            image: format!("img/{}.jpg", id),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Running Shoe", 5000, "shoes"),
            product(2, "Linen Shirt", 2000, "clothes"),
            product(3, "Trail Shoe", 5000, "shoes"),
            product(4, "Wool Socks", 800, "clothes"),
            product(5, "Shoe Polish", 2000, "care"),
        ]
    }

    fn ids(visible: &VisibleProducts<'_>) -> Vec<i64> {
        visible
            .items
            .iter()
            .map(|p| match p.id {
                ProductId::Number(n) => n,
                ProductId::Text(_) => unreachable!(),
            })
            .collect()
    }

    fn criteria(search: &str, category: &str, sort: SortOrder) -> FilterCriteria {
        FilterCriteria {
            search_text: search.to_string(),
            category: CategoryFilter::from(category),
            sort_order: sort,
        }
    }

    #[test]
    fn test_two_product_example() {
        let catalog = vec![
            product(1, "Shoe", 5000, "shoes"),
            product(2, "Shirt", 2000, "clothes"),
        ];
        let visible = compute_visible(
            &catalog,
            &criteria("", "all", SortOrder::LowHigh),
            &PaginationState::new(6),
        );
        assert_eq!(ids(&visible), vec![2, 1]);
        assert!(!visible.has_more);
    }

    #[test]
    fn test_unsorted_keeps_catalog_order() {
        let catalog = sample();
        let visible = compute_visible(&catalog, &FilterCriteria::default(), &PaginationState::new(10));
        assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = sample();
        let visible = compute_visible(
            &catalog,
            &criteria("sHoE", "all", SortOrder::Unsorted),
            &PaginationState::new(10),
        );
        assert_eq!(ids(&visible), vec![1, 3, 5]);
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let catalog = sample();
        let pagination = PaginationState::new(10);

        let visible = compute_visible(&catalog, &criteria("", "clothes", SortOrder::Unsorted), &pagination);
        assert_eq!(ids(&visible), vec![2, 4]);

        let visible = compute_visible(&catalog, &criteria("", "Clothes", SortOrder::Unsorted), &pagination);
        assert!(visible.is_no_results());
        assert!(!visible.has_more);
    }

    #[test]
    fn test_search_and_category_compound() {
        let catalog = sample();
        let visible = compute_visible(
            &catalog,
            &criteria("shoe", "shoes", SortOrder::Unsorted),
            &PaginationState::new(10),
        );
        assert_eq!(ids(&visible), vec![1, 3]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let catalog = sample();
        let pagination = PaginationState::new(10);

        let low = compute_visible(&catalog, &criteria("", "all", SortOrder::LowHigh), &pagination);
        assert_eq!(ids(&low), vec![4, 2, 5, 1, 3]);

        let high = compute_visible(&catalog, &criteria("", "all", SortOrder::HighLow), &pagination);
        assert_eq!(ids(&high), vec![1, 3, 2, 5, 4]);
    }

    #[test]
    fn test_pagination_counts() {
        let catalog = sample();
        let all = FilterCriteria::default();

        let mut pagination = PaginationState::new(2);
        let visible = compute_visible(&catalog, &all, &pagination);
        assert_eq!(visible.items.len(), 2);
        assert_eq!(visible.filtered_count, 5);
        assert!(visible.has_more);

        pagination.advance();
        pagination.advance();
        let visible = compute_visible(&catalog, &all, &pagination);
        assert_eq!(visible.items.len(), 5);
        assert!(!visible.has_more);

        // Past the end stays clamped.
        pagination.advance();
        let visible = compute_visible(&catalog, &all, &pagination);
        assert_eq!(visible.items.len(), 5);
        assert!(!visible.has_more);
    }

    #[test]
    fn test_visible_len_matches_formula_for_every_page() {
        let catalog = sample();
        for page_size in 1..=6 {
            for page in 1..=6u32 {
                let pagination = PaginationState::at_page(page_size, page);
                let visible = compute_visible(&catalog, &FilterCriteria::default(), &pagination);
                let expected = (page_size * page as usize).min(catalog.len());
                assert_eq!(visible.items.len(), expected);
                assert_eq!(visible.has_more, catalog.len() > expected);
            }
        }
    }

    #[test]
    fn test_deterministic_and_source_untouched() {
        let catalog = sample();
        let before = catalog.clone();
        let c = criteria("s", "all", SortOrder::HighLow);
        let p = PaginationState::new(3);

        let first = compute_visible(&catalog, &c, &p);
        let second = compute_visible(&catalog, &c, &p);
        assert_eq!(first, second);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_pagination_reset_and_floor() {
        let mut pagination = PaginationState::at_page(6, 0);
        assert_eq!(pagination.current_page(), 1);
        pagination.advance();
        assert_eq!(pagination.current_page(), 2);
        pagination.reset();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(PaginationState::new(0).page_size(), 1);
    }

    #[test]
    fn test_selector_values_parse() {
        assert_eq!("low-high".parse::<SortOrder>().unwrap(), SortOrder::LowHigh);
        assert_eq!("none".parse::<SortOrder>().unwrap(), SortOrder::Unsorted);
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::Only("All".to_string()));
    }

    #[test]
    fn test_criteria_wire_form() {
        let json = serde_json::to_value(criteria("hat", "all", SortOrder::HighLow)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"searchText": "hat", "category": "all", "sortOrder": "high-low"})
        );
        let back: FilterCriteria =
            serde_json::from_str(r#"{"searchText":"","category":"shoes","sortOrder":"none"}"#).unwrap();
        assert_eq!(back.category, CategoryFilter::Only("shoes".to_string()));
        assert_eq!(back.sort_order, SortOrder::Unsorted);
    }
}
