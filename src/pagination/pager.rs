//! Deep pager
//!
//! Runs the paging pipeline for one request: validate, choose direction,
//! reduce the offset, fetch in batches, restore the requested order.

use super::batch::BatchFetcher;
use super::direction::select_direction;
use super::offset::OffsetReducer;
use super::types::{PageRequest, PagerConfig, Window};
use crate::backend::{Document, SearchBackend};
use crate::error::Result;
use crate::query::Query;
use crate::types::JsonValue;
use tracing::debug;

/// Serves arbitrarily deep pages from a backend with per-call caps
///
/// Holds no per-request state; concurrent searches share only the backend.
///
/// # Examples
///
/// ```rust,ignore
/// let pager = DeepPager::new(backend);
/// let request = PageRequest::new("test_data_*", "id")
///     .from(100_000_000)
///     .size(10_000);
/// let hits = pager.search(&request).await?;
/// ```
#[derive(Debug)]
pub struct DeepPager<B> {
    backend: B,
    config: PagerConfig,
}

impl<B: SearchBackend> DeepPager<B> {
    /// Create a pager with default caps
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: PagerConfig::default(),
        }
    }

    /// Create a pager with explicit caps
    pub fn with_config(backend: B, config: PagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// The backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The caps in use
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Number of documents matching `query`
    pub async fn count(&self, index: &str, query: &Query) -> Result<i64> {
        self.backend.count(index, query).await
    }

    /// Fetch one logical page, returning document payloads
    pub async fn search(&self, request: &PageRequest) -> Result<Vec<JsonValue>> {
        Ok(self
            .search_documents(request)
            .await?
            .into_iter()
            .map(|doc| doc.payload)
            .collect())
    }

    /// Fetch one logical page, keeping each document's sort value
    pub async fn search_documents(&self, request: &PageRequest) -> Result<Vec<Document>> {
        request.validate()?;
        if request.size == 0 {
            return Ok(Vec::new());
        }

        let max_from = self.config.max_from;
        let mut window = Window::forward(request.from, request.size, request.order);

        if request.from > max_from {
            let total = self.backend.count(&request.index, &request.query).await?;
            match select_direction(total, request.from, request.size, request.order, max_from) {
                Some(selected) => window = selected,
                None => {
                    debug!(total, from = request.from, "window lies past the result set");
                    return Ok(Vec::new());
                }
            }
            if window.reversed {
                debug!(
                    total,
                    from = window.from,
                    size = window.size,
                    order = %window.order,
                    "reading from the tail"
                );
            }
        }

        let narrowed;
        let (first_query, from) = if window.from > max_from {
            let reducer = OffsetReducer::new(&self.backend, request, max_from);
            match reducer.narrow(window.order, window.from).await? {
                Some((query, reduced_from)) => {
                    narrowed = query;
                    (&narrowed, reduced_from)
                }
                None => return Ok(Vec::new()),
            }
        } else {
            (&request.query, window.from)
        };

        let fetcher = BatchFetcher::new(&self.backend, request, window.order, self.config.max_size);
        let mut documents = fetcher.collect(first_query, from, window.size).await?;

        if window.reversed {
            documents.reverse();
        }
        Ok(documents)
    }
}
