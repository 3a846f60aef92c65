//! Pagination utilities
//!
//! Page numbers are 1-indexed. A page request is validated once at the
//! boundary and then only ever produces non-negative offsets.

use crate::{Error, Result};

/// Largest page size accepted from a client
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Default page size for song listings
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Default page size (in verses) for lyrics pages
pub const DEFAULT_LYRICS_LIMIT: i64 = 2;

/// Validated page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Validate a page/limit pair
    ///
    /// Both values must be `>= 1`; `limit` must not exceed [`MAX_PAGE_LIMIT`].
    /// The page is never clamped against the number of available pages;
    /// callers decide what an out-of-range page means.
    ///
    /// # Examples
    /// ```
    /// use songcat_common::pagination::PageRequest;
    ///
    /// let p = PageRequest::new(3, 10).unwrap();
    /// assert_eq!(p.offset(), 20);
    /// assert_eq!(p.total_pages(25), 3);
    ///
    /// assert!(PageRequest::new(0, 10).is_err());
    /// assert!(PageRequest::new(1, 0).is_err());
    /// ```
    pub fn new(page: i64, limit: i64) -> Result<Self> {
        if page < 1 {
            return Err(Error::InvalidInput(format!(
                "Invalid page parameter: {} (must be >= 1)",
                page
            )));
        }
        if limit < 1 {
            return Err(Error::InvalidInput(format!(
                "Invalid limit parameter: {} (must be >= 1)",
                limit
            )));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(Error::InvalidInput(format!(
                "Invalid limit parameter: {} (must be <= {})",
                limit, MAX_PAGE_LIMIT
            )));
        }

        Ok(Self { page, limit })
    }

    /// Parse raw query-string values
    ///
    /// Absent values fall back to page 1 and `default_limit`. Values that
    /// are present but not integers are rejected rather than defaulted.
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Result<Self> {
        let page = match page {
            Some(raw) => parse_param("page", raw)?,
            None => 1,
        };
        let limit = match limit {
            Some(raw) => parse_param("limit", raw)?,
            None => default_limit,
        };

        Self::new(page, limit)
    }

    /// Current page number (1-indexed)
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Page size
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Offset of the first item on this page
    ///
    /// Saturates instead of overflowing for absurdly large page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed for `total_items` items (0 when empty)
    pub fn total_pages(&self, total_items: u64) -> u64 {
        let limit = self.limit as u64;
        (total_items + limit - 1) / limit
    }
}

fn parse_param(name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("Invalid {} parameter: {:?}", name, raw)))
}
