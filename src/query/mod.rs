//! Query module
//!
//! A small query algebra: an opaque caller query plus the range filters
//! on the sort field that deep paging injects.
//!
//! # Overview
//!
//! Queries are immutable values. `with_bound` and `with_range` never
//! touch the receiver; they return a new query that must match both the
//! original and the added range filter. Serialization to Elasticsearch
//! DSL happens in exactly one place, `Query::to_dsl`.

mod types;

pub use types::{Comparator, Query, RangeBound};

#[cfg(test)]
mod tests;
