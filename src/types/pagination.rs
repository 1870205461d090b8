//! Pagination types for list endpoints.
//!
//! Every listing in the system accepts the same four query parameters
//! (`sort`, `filter`, `skip`, `limit`) and answers with the same page
//! envelope (`docs`, `total`, `limit`, `offset`).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_LIMIT, DEFAULT_SORT, MAX_PAGE_LIMIT};
use crate::domain::{ProductResponse, UserResponse};
use crate::errors::{AppError, AppResult};

/// Listing query parameters (reusable across all list endpoints)
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Sort field, prefixed with `-` for descending order
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Case-insensitive substring match against the entity's text field
    #[serde(default)]
    pub filter: String,
    /// Number of documents to skip
    #[serde(default)]
    pub skip: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort: default_sort(),
            filter: String::new(),
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Direction component of a parsed sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl ListQuery {
    /// Split the sort parameter into field name and direction.
    ///
    /// A leading `-` means descending; everything else is ascending.
    pub fn sort_spec(&self) -> (&str, SortDirection) {
        match self.sort.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (self.sort.as_str(), SortDirection::Ascending),
        }
    }

    /// Validated `(skip, limit)` pair with the limit capped at [`MAX_PAGE_LIMIT`].
    pub fn page_bounds(&self) -> AppResult<(u64, u64)> {
        if self.limit == 0 {
            return Err(AppError::validation("limit must be greater than zero"));
        }
        Ok((self.skip, self.limit.min(MAX_PAGE_LIMIT)))
    }
}

/// Uniform page envelope returned by every listing operation.
///
/// `total` counts the full filtered set regardless of paging, so clients
/// can render pagination controls.
#[derive(Debug, Serialize, ToSchema)]
#[aliases(ProductPage = Page<ProductResponse>, UserPage = Page<UserResponse>)]
pub struct Page<T> {
    /// Current page of documents in the requested sort order
    pub docs: Vec<T>,
    /// Count over the full filtered set
    pub total: u64,
    /// Effective page size
    pub limit: u64,
    /// Number of documents skipped
    pub offset: u64,
}

impl<T> Page<T> {
    /// Create a new page envelope
    pub fn new(docs: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        Self {
            docs,
            total,
            limit,
            offset,
        }
    }

    /// Convert the documents while keeping the envelope metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
