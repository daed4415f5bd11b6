//! Pagination and list-query types shared by every list endpoint.

use sea_orm::Order;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Query string accepted by list endpoints.
///
/// `page` is 1-based; zero or negative pages normalize to the first page.
/// `deleteFlg` lets the back office request soft-deleted rows explicitly;
/// when absent, listings only return live rows.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<i32>,
    pub delete_flg: Option<i32>,
    pub page: Option<i64>,
    pub items_per_page: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    /// Catalog type filter (public service listing)
    pub category: Option<i32>,
    /// Truncate post content to this many words (public post listing)
    pub limit_words: Option<usize>,
}

impl ListQuery {
    pub fn pageable(&self) -> Pageable {
        Pageable::new(self.page, self.items_per_page)
    }

    pub fn sort(&self) -> SortParams {
        SortParams {
            sort_by: self.sort_by.clone(),
            sort_desc: self.sort_desc.unwrap_or(false),
        }
    }

    pub fn filter(&self) -> FindParams {
        FindParams {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            status: self.status,
            delete_flg: self.delete_flg,
        }
    }
}

/// Conjunction of optional list predicates.
#[derive(Debug, Clone, Default)]
pub struct FindParams {
    /// Substring match on the entity's designated text field
    pub search: Option<String>,
    pub status: Option<i32>,
    /// None = only live rows
    pub delete_flg: Option<i32>,
}

/// Limit/offset window derived from a 1-based page number.
#[derive(Debug, Clone, Copy)]
pub struct Pageable {
    pub limit: u64,
    pub offset: u64,
}

impl Pageable {
    pub fn new(page: Option<i64>, items_per_page: Option<u64>) -> Self {
        let current = match page {
            Some(p) if p > 0 => (p - 1) as u64,
            _ => 0,
        };
        let limit = items_per_page
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self {
            limit,
            offset: current * limit,
        }
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Sort field + direction requested by the client. Repositories map the
/// field name onto a whitelisted column and fall back to creation time.
#[derive(Debug, Clone, Default)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub sort_desc: bool,
}

impl SortParams {
    pub fn direction(&self) -> Order {
        if self.sort_desc {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pageable_defaults_to_first_page_of_ten() {
        let p = Pageable::new(None, None);
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn pageable_normalizes_non_positive_pages() {
        assert_eq!(Pageable::new(Some(0), Some(20)).offset, 0);
        assert_eq!(Pageable::new(Some(-3), Some(20)).offset, 0);
    }

    #[test]
    fn pageable_computes_offset_from_one_based_page() {
        let p = Pageable::new(Some(3), Some(25));
        assert_eq!(p.limit, 25);
        assert_eq!(p.offset, 50);
    }

    #[test]
    fn pageable_caps_page_size() {
        assert_eq!(Pageable::new(Some(1), Some(10_000)).limit, MAX_PAGE_SIZE);
    }
}
