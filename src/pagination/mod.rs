//! Pagination module
//!
//! Deep paging over a backend that caps `from` and `size` per request.
//!
//! # Overview
//!
//! A request for `from`/`size` of any magnitude is served by a fixed
//! pipeline:
//!
//! 1. **Direction**: a window closer to the tail is read in reverse order
//!    (see [`select_direction`]).
//! 2. **Offset reduction**: a large `from` is replaced by a small one plus a
//!    range filter on the sort field, found by binary search over sort
//!    values using count probes ([`OffsetReducer`]).
//! 3. **Batching**: documents are fetched in capped batches, each batch
//!    starting strictly after the last sort value seen ([`BatchFetcher`]).
//! 4. **Reversal**: reverse-order results are flipped back.
//!
//! [`DeepPager`] runs the pipeline.

mod batch;
mod direction;
mod offset;
mod pager;
mod types;

pub use batch::BatchFetcher;
pub use direction::select_direction;
pub use offset::OffsetReducer;
pub use pager::DeepPager;
pub use types::{PageRequest, PagerConfig, Reduction, Window};
