//! # Pagination
//!
//! Offset pagination for the post feed: a validated [`PageRequest`], the
//! `(offset, limit)` window it maps to, and the metadata derived from the
//! total row count.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, Result};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Builds a request from optional raw values, applying defaults.
    /// Zero and negative values are rejected; there is no upper bound.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let page = positive("page", page, DEFAULT_PAGE)?;
        let limit = positive("limit", limit, DEFAULT_LIMIT)?;
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The slice of the ordered feed this request covers. The offset
    /// saturates; anything that far out is past the end of the feed.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive(name: &str, value: Option<i64>, default: u64) -> Result<u64> {
    let Some(raw) = value else {
        return Ok(default);
    };
    u64::try_from(raw)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| DomainError::validation(format!("{name} must be a positive integer")))
}

/// Number of rows to skip and take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(total: u64, request: PageRequest) -> Self {
        let total_pages = total.div_ceil(request.limit);
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

/// A page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}
