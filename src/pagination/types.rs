//! Pagination types
//!
//! Request, configuration and intermediate values of the paging pipeline.

use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::{SortOrder, SortValue};
use serde::{Deserialize, Serialize};

/// Default per-call offset cap
pub const DEFAULT_MAX_FROM: i64 = 2000;

/// Default per-call page size cap
pub const DEFAULT_MAX_SIZE: i64 = 3000;

/// Per-call limits the backend honours
///
/// Both must stay well inside the index's `max_result_window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Largest `from` sent in a single request
    #[serde(default = "default_max_from")]
    pub max_from: i64,
    /// Largest `size` sent in a single request
    #[serde(default = "default_max_size")]
    pub max_size: i64,
}

fn default_max_from() -> i64 {
    DEFAULT_MAX_FROM
}

fn default_max_size() -> i64 {
    DEFAULT_MAX_SIZE
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_from: DEFAULT_MAX_FROM,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl PagerConfig {
    /// Create a config with explicit caps
    pub fn new(max_from: i64, max_size: i64) -> Self {
        Self { max_from, max_size }
    }

    /// Check that the caps are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_from < 1 {
            return Err(Error::invalid_config("max_from", "must be at least 1"));
        }
        if self.max_size < 1 {
            return Err(Error::invalid_config("max_size", "must be at least 1"));
        }
        Ok(())
    }
}

/// A logical page request, unbounded in `from` and `size`
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Index name or pattern, e.g. `test_data_*`
    pub index: String,
    /// Base query; `MatchAll` when unset
    pub query: Query,
    /// Source fields to return
    pub source: Option<Vec<String>>,
    /// Unique, totally ordered integer field
    pub sort_field: String,
    /// Requested order
    pub order: SortOrder,
    /// Documents to skip
    pub from: i64,
    /// Documents to return
    pub size: i64,
}

impl PageRequest {
    /// Create a request for the first 10 documents in ascending order
    pub fn new(index: impl Into<String>, sort_field: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            query: Query::MatchAll,
            source: None,
            sort_field: sort_field.into(),
            order: SortOrder::Asc,
            from: 0,
            size: 10,
        }
    }

    /// Set the base query
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Set the source filter
    #[must_use]
    pub fn source<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the sort order from an ascending flag
    #[must_use]
    pub fn ascending(self, ascending: bool) -> Self {
        self.order(SortOrder::from_ascending(ascending))
    }

    /// Set the offset
    #[must_use]
    pub fn from(mut self, from: i64) -> Self {
        self.from = from;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Reject malformed requests before any backend call
    pub fn validate(&self) -> Result<()> {
        if self.index.trim().is_empty() {
            return Err(Error::invalid_argument("index can not be empty"));
        }
        if self.sort_field.trim().is_empty() {
            return Err(Error::invalid_argument("sort field can not be empty"));
        }
        if self.from < 0 || self.size < 0 {
            return Err(Error::invalid_argument(format!(
                "from [{}] and size [{}] can not be negative",
                self.from, self.size
            )));
        }
        Ok(())
    }
}

/// The window actually read from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Offset in `order`
    pub from: i64,
    /// Number of documents
    pub size: i64,
    /// Traversal order
    pub order: SortOrder,
    /// Whether `order` is the reverse of the requested one
    pub reversed: bool,
}

impl Window {
    /// The requested window, read as asked
    pub fn forward(from: i64, size: i64, order: SortOrder) -> Self {
        Self {
            from,
            size,
            order,
            reversed: false,
        }
    }
}

/// Outcome of offset reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    /// Excluded sort value: results start strictly after it
    pub boundary: SortValue,
    /// Remaining offset past the boundary
    pub from: i64,
    /// Number of count probes issued
    pub probes: u32,
}
