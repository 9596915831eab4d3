//! Capped batch fetching
//!
//! Collects `size` documents in batches of at most `max_size`. Only the
//! first batch uses an offset; every later batch restarts at offset zero
//! with a strict range filter past the last sort value seen. Because sort
//! values are unique, consecutive batches never overlap and never skip.

use super::types::PageRequest;
use crate::backend::{Document, FetchRequest, SearchBackend};
use crate::error::Result;
use crate::query::{Comparator, Query};
use crate::types::SortOrder;
use tracing::debug;

/// Sequential cursor reader over the request's index
pub struct BatchFetcher<'a, B: ?Sized> {
    backend: &'a B,
    request: &'a PageRequest,
    order: SortOrder,
    max_size: i64,
}

impl<'a, B: SearchBackend + ?Sized> BatchFetcher<'a, B> {
    /// Create a fetcher reading in `order`
    pub fn new(backend: &'a B, request: &'a PageRequest, order: SortOrder, max_size: i64) -> Self {
        Self {
            backend,
            request,
            order,
            max_size,
        }
    }

    fn fetch_request<'q>(&'q self, query: &'q Query, from: i64, size: i64) -> FetchRequest<'q> {
        FetchRequest {
            index: &self.request.index,
            query,
            source: self.request.source.as_deref(),
            sort_field: &self.request.sort_field,
            order: self.order,
            from,
            size,
        }
    }

    /// Read up to `size` documents starting at `from` of `first_query`
    ///
    /// Cursor filters are applied to the request's base query. An empty
    /// batch ends the read early; that is not an error.
    pub async fn collect(&self, first_query: &Query, from: i64, size: i64) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> = Vec::new();
        if size <= 0 {
            return Ok(documents);
        }

        let mut retrieve_size = size.min(self.max_size);
        let mut batch = self
            .backend
            .fetch(&self.fetch_request(first_query, from, retrieve_size))
            .await?;
        let mut batches = 1;

        while !batch.is_empty() {
            let last_value = batch.last().map(|doc| doc.sort_value);
            documents.extend(batch);

            let remaining = size - documents.len() as i64;
            let Some(last_value) = last_value.filter(|_| remaining > 0) else {
                break;
            };

            let cursor = self.request.query.with_bound(
                &self.request.sort_field,
                Comparator::after(self.order),
                last_value,
            );
            retrieve_size = remaining.min(self.max_size);
            batch = self
                .backend
                .fetch(&self.fetch_request(&cursor, 0, retrieve_size))
                .await?;
            batches += 1;
        }

        documents.truncate(size as usize);
        debug!(
            batches,
            documents = documents.len(),
            requested = size,
            "batch fetch finished"
        );
        Ok(documents)
    }
}
