//! Order queries
//!
//! Pure filtering, searching and sorting used by the admin dashboard and the
//! order history view.

use std::{cmp::Ordering, str::FromStr};

use crate::{
    orders::{Order, OrderStatus},
    parse::ParseVariantError,
};

/// Status filter; `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status
    #[default]
    All,

    /// A single status
    Only(OrderStatus),
}

impl StatusFilter {
    /// Whether an order in `status` passes the filter.
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(only) => only == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }

        s.parse().map(StatusFilter::Only)
    }
}

/// Sort order for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first
    #[default]
    Newest,

    /// Oldest first
    Oldest,

    /// Largest total first
    Highest,

    /// Smallest total first
    Lowest,
}

impl SortKey {
    fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::Oldest => a.created_at.cmp(&b.created_at),
            SortKey::Highest => b.total.cmp(&a.total),
            SortKey::Lowest => a.total.cmp(&b.total),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "highest" => Ok(SortKey::Highest),
            "lowest" => Ok(SortKey::Lowest),
            _ => Err(ParseVariantError::new(
                "sort key",
                s,
                "newest, oldest, highest, lowest",
            )),
        }
    }
}

/// Keeps the orders that pass `filter`, in input order.
pub fn filter_by_status<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    filter: StatusFilter,
) -> Vec<&'a Order> {
    orders
        .into_iter()
        .filter(|order| filter.matches(order.status))
        .collect()
}

/// Keeps the orders whose id, customer name, phone or address contains
/// `query`, ignoring case. An empty query keeps every order; whitespace is
/// matched literally.
pub fn search_orders<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    query: &str,
) -> Vec<&'a Order> {
    let query = query.to_lowercase();

    orders
        .into_iter()
        .filter(|order| query.is_empty() || matches_query(order, &query))
        .collect()
}

/// Sorts orders by `key`. The sort is stable, so orders with equal keys keep
/// their input order.
pub fn sort_orders<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    key: SortKey,
) -> Vec<&'a Order> {
    let mut sorted: Vec<&Order> = orders.into_iter().collect();

    sorted.sort_by(|a, b| key.compare(a, b));

    sorted
}

fn matches_query(order: &Order, query: &str) -> bool {
    [
        order.id.to_string().as_str(),
        order.customer.name.as_str(),
        order.customer.phone.as_str(),
        order.customer.address.as_str(),
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(query))
}

/// Admin dashboard query: status filter, then search, then sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Status filter
    pub status: StatusFilter,

    /// Free-text search
    pub search: String,

    /// Sort order
    pub sort: SortKey,
}

impl OrderQuery {
    /// Runs the query over `orders`.
    pub fn apply<'a>(&self, orders: impl IntoIterator<Item = &'a Order>) -> Vec<&'a Order> {
        let filtered = filter_by_status(orders, self.status);
        let searched = search_orders(filtered, &self.search);

        sort_orders(searched, self.sort)
    }
}
