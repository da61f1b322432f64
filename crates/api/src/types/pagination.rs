//! Pagination and ordering for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use domain::SORT_DESC;

/// Creation-time ordering of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a sort keyword. Only `"desc"` selects descending order;
    /// anything else, including an empty string, is ascending.
    pub fn parse_lossy(s: &str) -> Self {
        if s == SORT_DESC {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// A page selection. Zero in either field means "everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// True when the whole collection should be returned.
    pub fn is_unbounded(&self) -> bool {
        self.page == 0 || self.limit == 0
    }

    /// Row offset of the first item on this (1-indexed) page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Apply this page to an already sorted collection.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_unbounded() {
            return items;
        }
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

/// Raw `?page=&limit=&sort=` query string.
///
/// Values are kept as strings so that malformed numbers degrade to 0
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-indexed page number; 0 or absent returns all products
    pub page: Option<String>,
    /// Page size; 0 or absent returns all products
    pub limit: Option<String>,
    /// `asc` (default) or `desc` by creation time
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(lenient_u64(&self.page), lenient_u64(&self.limit))
    }

    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::parse_lossy(self.sort.as_deref().unwrap_or_default())
    }
}

fn lenient_u64(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
