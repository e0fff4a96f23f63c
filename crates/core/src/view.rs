//! Derived view computations.
//!
//! Stateless filters, sorts and pagination over store snapshots. Each query
//! borrows from the collection it is applied to and never reorders it in
//! place.

use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Order, OrderStatus, ParseStatusError, Price, Product};

// =============================================================================
// Pagination
// =============================================================================

/// One page of a larger collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page. Empty when the page is past the end.
    pub items: &'a [T],
    /// Requested 1-based page number.
    pub number: usize,
    /// Number of pages; at least one even for an empty collection.
    pub total_pages: usize,
    /// Length of the whole collection.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Number of pages needed for `len` items, never less than one.
#[must_use]
pub const fn page_count(len: usize, per_page: NonZeroUsize) -> usize {
    let pages = len.div_ceil(per_page.get());
    if pages == 0 { 1 } else { pages }
}

/// Slice out 1-based page `page` of `items`.
///
/// Page zero and pages past the last one yield an empty page rather than an
/// error.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: NonZeroUsize) -> Page<'_, T> {
    let size = per_page.get();
    let slice = page
        .checked_sub(1)
        .map(|index| index.saturating_mul(size))
        .filter(|start| *start < items.len())
        .and_then(|start| items.get(start..start.saturating_add(size).min(items.len())))
        .unwrap_or(&[]);

    Page {
        items: slice,
        number: page,
        total_pages: page_count(items.len(), per_page),
        total_items: items.len(),
    }
}

// =============================================================================
// Order filters
// =============================================================================

/// Status filter with an `All` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Filters for the admin orders table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring of the customer name.
    pub user: String,
    /// Case-insensitive substring of the order ID; a full ID matches exactly.
    pub order_id: String,
}

impl OrderQuery {
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.status.matches(order.status)
            && contains_ignore_case(&order.user_name, &self.user)
            && contains_ignore_case(order.id.as_str(), &self.order_id)
    }

    /// Orders matching every filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// Catalog filters
// =============================================================================

/// Category filter with an `all` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

/// Inclusive price bounds; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: Option<Price>,
    pub max: Option<Price>,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Option<Price>, max: Option<Price>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Error parsing a sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort key: {0} (expected popular, newest, price-asc or price-desc)")]
pub struct ParseSortKeyError(pub String);

/// Catalog sort order. All sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order as served.
    #[default]
    Popular,
    /// Most recently listed first (reverse catalog order).
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Sort `products` in place.
    pub fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Popular => {}
            Self::Newest => products.reverse(),
            Self::PriceAsc => products.sort_by_key(|product| product.price),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "popular" => Ok(Self::Popular),
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Filters and sort order for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub price: PriceRange,
    pub sort: SortKey,
}

impl CatalogQuery {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(&product.category) && self.price.contains(product.price)
    }

    /// Matching products in sorted order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matching: Vec<&Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .collect();
        self.sort.sort(&mut matching);
        matching
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::{OrderId, ProductId};

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn order(id: &str, user: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            user_name: user.to_string(),
            date: Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap(),
            items: Vec::new(),
            total: Price::from_dollars(10),
            status,
        }
    }

    fn product(id: i64, dollars: u32, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            size: String::new(),
            price: Price::from_dollars(dollars),
            category: category.to_string(),
            image_url: String::new(),
            is_bestseller: false,
            is_new_formula: false,
        }
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_page_count_floor_of_one() {
        assert_eq!(page_count(0, size(5)), 1);
        assert_eq!(page_count(5, size(5)), 1);
        assert_eq!(page_count(6, size(5)), 2);
        assert_eq!(page_count(11, size(5)), 3);
    }

    #[test]
    fn test_paginate_slices_by_page() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, 3, size(5));
        assert_eq!(page.items, &[11, 12]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 12);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items: Vec<u32> = (1..=4).collect();
        assert!(paginate(&items, 2, size(5)).items.is_empty());
        assert!(paginate(&items, 0, size(5)).items.is_empty());
        assert!(paginate(&items, usize::MAX, size(5)).items.is_empty());
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, size(5));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_pages_concatenate_to_whole() {
        for len in 0..=23 {
            let items: Vec<usize> = (0..len).collect();
            for per_page in 1..=7 {
                let per_page = size(per_page);
                let pages = page_count(len, per_page);
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|n| paginate(&items, n, per_page).items.iter().copied())
                    .collect();
                assert_eq!(joined, items, "len={len} per_page={per_page}");
            }
        }
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Canceled".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(OrderStatus::Canceled))
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_order_query_combines_filters() {
        let orders = vec![
            order("101", "Mona Adel", OrderStatus::Pending),
            order("102", "Omar Hany", OrderStatus::Completed),
            order("2101", "mona samir", OrderStatus::Pending),
            order("103", "Laila", OrderStatus::Canceled),
        ];

        let all = OrderQuery::default().apply(&orders);
        assert_eq!(all.len(), 4);

        let query = OrderQuery {
            status: StatusFilter::Only(OrderStatus::Pending),
            user: "MONA".to_string(),
            order_id: String::new(),
        };
        let found: Vec<&str> = query.apply(&orders).iter().map(|o| o.id.as_str()).collect();
        assert_eq!(found, vec!["101", "2101"]);

        let query = OrderQuery {
            order_id: "101".to_string(),
            ..OrderQuery::default()
        };
        let found: Vec<&str> = query.apply(&orders).iter().map(|o| o.id.as_str()).collect();
        assert_eq!(found, vec!["101", "2101"]);

        let query = OrderQuery {
            order_id: "2101".to_string(),
            ..OrderQuery::default()
        };
        assert_eq!(query.apply(&orders).len(), 1);
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::new(Some(Price::from_dollars(10)), Some(Price::from_dollars(20)));
        assert!(range.contains(Price::from_dollars(10)));
        assert!(range.contains(Price::from_dollars(20)));
        assert!(!range.contains(Price::from_cents(999)));
        assert!(!range.contains(Price::from_cents(2001)));
        assert!(PriceRange::default().contains(Price::from_dollars(1000)));
    }

    #[test]
    fn test_category_filter() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        let serums: CategoryFilter = "Serums".parse().unwrap();
        assert!(serums.matches("Serums"));
        assert!(!serums.matches("serums"));
        assert!(CategoryFilter::All.matches("Masks"));
    }

    #[test]
    fn test_sort_is_stable() {
        let products = vec![
            product(1, 20, "Serums"),
            product(2, 10, "Serums"),
            product(3, 20, "Masks"),
            product(4, 10, "Masks"),
            product(5, 15, "Masks"),
        ];
        let query = |sort| CatalogQuery {
            sort,
            ..CatalogQuery::default()
        };

        assert_eq!(ids(&query(SortKey::PriceAsc).apply(&products)), vec![2, 4, 5, 1, 3]);
        assert_eq!(ids(&query(SortKey::PriceDesc).apply(&products)), vec![1, 3, 5, 2, 4]);
        assert_eq!(ids(&query(SortKey::Newest).apply(&products)), vec![5, 4, 3, 2, 1]);
        assert_eq!(ids(&query(SortKey::Popular).apply(&products)), vec![1, 2, 3, 4, 5]);

        let first = query(SortKey::PriceAsc).apply(&products);
        let second = query(SortKey::PriceAsc).apply(&products);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_catalog_query_filters_then_sorts() {
        let products = vec![
            product(1, 40, "Serums"),
            product(2, 12, "Serums"),
            product(3, 25, "Serums"),
            product(4, 18, "Masks"),
        ];
        let query = CatalogQuery {
            category: CategoryFilter::Only("Serums".to_string()),
            price: PriceRange::new(None, Some(Price::from_dollars(30))),
            sort: SortKey::PriceDesc,
        };
        assert_eq!(ids(&query.apply(&products)), vec![3, 2]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price_desc".parse::<SortKey>(), Ok(SortKey::PriceDesc));
        assert_eq!("Price-Asc".parse::<SortKey>(), Ok(SortKey::PriceAsc));
        assert!("cheapest".parse::<SortKey>().is_err());
    }
}
