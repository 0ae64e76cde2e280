//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// A resolved page request: 1-based page number and page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Builds a page request from optional caller input.
    ///
    /// Missing or zero page numbers become 1; the page size falls back to
    /// `default_size` and is clamped to `1..=max_size`.
    #[must_use]
    pub fn resolve(page: Option<u32>, per_page: Option<u32>, default_size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_size).clamp(1, max_size),
        }
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub current_page: u32,
    /// Total number of pages; 0 when there are no items.
    pub total_pages: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// Items per page.
    pub page_size: u32,
}

impl PageMeta {
    /// Computes metadata for `total` items split by `request`.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            current_page: request.page,
            total_pages: total.div_ceil(request.limit().max(1)),
            total,
            page_size: request.per_page,
        }
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: PageMeta::new(request, total),
        }
    }
}
