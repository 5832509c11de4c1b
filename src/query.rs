//! Search and pagination over the task table.

use crate::types::{Task, ValidationError};
use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Case-sensitive substring match on title, description or category.
///
/// `instr` keeps `%` and `_` literal, which `LIKE` would treat as wildcards.
/// The empty term short-circuits to match every row.
pub(crate) const SEARCH_PREDICATE: &str = "(?1 = '' \
     OR instr(title, ?1) > 0 \
     OR instr(COALESCE(description, ''), ?1) > 0 \
     OR instr(COALESCE(category, ''), ?1) > 0)";

/// One page worth of query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text search term; empty matches everything
    pub search: String,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Create a request for the first page with the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check the page number and size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::InvalidPage);
        }
        if self.page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// A page of tasks plus the counts over the whole filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub tasks: Vec<Task>,
    pub page: u32,
    pub page_size: u32,
    /// Rows matching the filter, ignoring pagination
    pub total: u64,
    /// Matching rows that are done
    pub done: u64,
}

impl Page {
    /// Page count for this result set, never less than 1.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    /// True when there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// True when there is a page before this one.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
