//! Offset reduction
//!
//! Replaces a large `from` with a small one. The search runs over sort
//! values rather than positions: each probe counts the documents between
//! the first sort value and a candidate boundary. Once the boundary
//! excludes all but at most `max_from` of the skipped documents, the
//! query is narrowed to values strictly after the boundary.

use super::types::{PageRequest, Reduction};
use crate::backend::{FetchRequest, SearchBackend};
use crate::error::Result;
use crate::query::{Comparator, Query};
use crate::types::{SortOrder, SortValue};
use tracing::{debug, trace, warn};

/// Binary search for a sort value boundary that absorbs most of `from`
pub struct OffsetReducer<'a, B: ?Sized> {
    backend: &'a B,
    request: &'a PageRequest,
    max_from: i64,
}

impl<'a, B: SearchBackend + ?Sized> OffsetReducer<'a, B> {
    /// Create a reducer for the request's index, query and sort field
    pub fn new(backend: &'a B, request: &'a PageRequest, max_from: i64) -> Self {
        Self {
            backend,
            request,
            max_from,
        }
    }

    /// Smallest and largest sort value matching the base query
    ///
    /// `None` when either probe finds nothing.
    pub async fn sort_bounds(&self) -> Result<Option<(SortValue, SortValue)>> {
        let Some(min) = self.edge_value(SortOrder::Asc).await? else {
            return Ok(None);
        };
        let Some(max) = self.edge_value(SortOrder::Desc).await? else {
            return Ok(None);
        };
        Ok(Some((min, max)))
    }

    async fn edge_value(&self, order: SortOrder) -> Result<Option<SortValue>> {
        let source = [self.request.sort_field.clone()];
        let batch = self
            .backend
            .fetch(&FetchRequest {
                index: &self.request.index,
                query: &self.request.query,
                source: Some(source.as_slice()),
                sort_field: &self.request.sort_field,
                order,
                from: 0,
                size: 1,
            })
            .await?;
        Ok(batch.first().map(|doc| doc.sort_value))
    }

    /// Narrow the base query so that reading in `order` starts after a
    /// boundary, returning the narrowed query and the reduced offset
    ///
    /// `None` when the boundary probes find no documents.
    pub async fn narrow(&self, order: SortOrder, from: i64) -> Result<Option<(Query, i64)>> {
        let Some((min, max)) = self.sort_bounds().await? else {
            debug!("boundary probes found no documents");
            return Ok(None);
        };

        let (sort_start, sort_end) = match order {
            SortOrder::Asc => (min, max),
            SortOrder::Desc => (max, min),
        };
        let reduction = self.reduce(sort_start, sort_end, from).await?;
        debug!(
            boundary = reduction.boundary,
            from = reduction.from,
            probes = reduction.probes,
            "offset reduced from {}",
            from
        );

        let query = self.request.query.with_bound(
            &self.request.sort_field,
            Comparator::after(order),
            reduction.boundary,
        );
        Ok(Some((query, reduction.from)))
    }

    /// Search the sort value interval `[sort_start, sort_end]` (given in
    /// traversal order) for a boundary leaving at most `max_from` to skip
    ///
    /// On return `count(sort_start..=boundary) == from - reduction.from`,
    /// except when the interval collapses to width one or less (duplicate
    /// sort values, or data changing between probes).
    pub async fn reduce(
        &self,
        sort_start: SortValue,
        sort_end: SortValue,
        from: i64,
    ) -> Result<Reduction> {
        let field = &self.request.sort_field;
        let mut new_start = sort_start;
        let mut new_end = sort_end;
        let mut probes = 0;

        loop {
            let low = i128::from(new_start.min(new_end));
            let span = (i128::from(new_end) - i128::from(new_start)).abs();
            if span <= 1 {
                warn!(
                    new_start,
                    new_end, probes, "offset reduction collapsed before reaching max_from"
                );
                return Ok(Reduction {
                    boundary: low as SortValue,
                    from: span as i64,
                    probes,
                });
            }
            // Strictly between the two ends, so it always fits an i64.
            let mid = (low + span / 2) as SortValue;

            let probe = if sort_start <= mid {
                self.request.query.with_range(field, sort_start, mid)
            } else {
                self.request.query.with_range(field, mid, sort_start)
            };
            let mid_count = self.backend.count(&self.request.index, &probe).await?;
            probes += 1;

            let new_from = from - mid_count;
            trace!(mid, mid_count, new_from, "offset probe");
            if new_from < 0 {
                new_end = mid;
            } else {
                new_start = mid;
                if new_from <= self.max_from {
                    return Ok(Reduction {
                        boundary: new_start,
                        from: new_from,
                        probes,
                    });
                }
            }
        }
    }
}
