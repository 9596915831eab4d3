//! Backend types and traits

use crate::error::Result;
use crate::query::Query;
use crate::types::{JsonValue, SortOrder, SortValue};
use async_trait::async_trait;

/// One hit returned by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Opaque document payload handed back to the caller
    pub payload: JsonValue,
    /// Value of the sort field, used to advance the cursor
    pub sort_value: SortValue,
}

impl Document {
    /// Create a new document
    pub fn new(payload: JsonValue, sort_value: SortValue) -> Self {
        Self {
            payload,
            sort_value,
        }
    }
}

/// Ordered documents returned by a single fetch
pub type Batch = Vec<Document>;

/// Parameters of a single capped fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest<'a> {
    /// Index name or pattern
    pub index: &'a str,
    /// Query to run
    pub query: &'a Query,
    /// Source fields to return (`None` = index default)
    pub source: Option<&'a [String]>,
    /// Unique numeric sort field
    pub sort_field: &'a str,
    /// Sort order
    pub order: SortOrder,
    /// Offset into the ordered result set
    pub from: i64,
    /// Maximum number of documents to return
    pub size: i64,
}

/// The two primitives deep paging is built on
///
/// Implementations must return documents ordered by `sort_field` and may
/// reject requests whose `from`/`size` exceed their own per-call caps.
/// Keeping callers under those caps is the pager's job.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Number of documents in `index` matching `query`
    async fn count(&self, index: &str, query: &Query) -> Result<i64>;

    /// One ordered page of documents
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Batch>;
}

#[async_trait]
impl<B: SearchBackend + ?Sized> SearchBackend for std::sync::Arc<B> {
    async fn count(&self, index: &str, query: &Query) -> Result<i64> {
        (**self).count(index, query).await
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Batch> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<'a, B: SearchBackend + ?Sized> SearchBackend for &'a B {
    async fn count(&self, index: &str, query: &Query) -> Result<i64> {
        (**self).count(index, query).await
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Batch> {
        (**self).fetch(request).await
    }
}
