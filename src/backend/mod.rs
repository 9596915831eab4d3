//! Search backend module
//!
//! The deep pager needs exactly two primitives from a search engine:
//! counting the documents matching a query, and fetching one ordered,
//! capped page of them. `SearchBackend` is that contract.
//!
//! # Implementations
//!
//! - **ElasticsearchBackend**: `_count` / `_search` over HTTP
//! - **MemoryBackend**: in-process documents, enforcing the same caps

mod elasticsearch;
mod memory;
mod types;

pub use elasticsearch::ElasticsearchBackend;
pub use memory::MemoryBackend;
pub use types::{Batch, Document, FetchRequest, SearchBackend};

#[cfg(test)]
mod tests;
