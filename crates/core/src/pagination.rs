//! 1-based page requests and the page envelope returned by list/search.

use serde::Serialize;

use crate::error::CoreError;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Validate a page number (`>= 1`) and size (`1..=MAX_PAGE_SIZE`).
    pub fn new(page: i64, size: i64) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation(
                "page must be greater than or equal to 1".into(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(CoreError::Validation(format!(
                "size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, size })
    }

    /// Like [`PageRequest::new`], filling missing values with the defaults.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Rows to skip: `(page - 1) * size`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Rows to return.
    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// A window of results plus the number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = (total + request.size - 1) / request.size;
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
            total_pages,
        }
    }

    /// Convert every item, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
        }
    }
}
