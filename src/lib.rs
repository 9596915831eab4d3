// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # es-deep-pager
//!
//! Arbitrarily deep `from`/`size` pagination over Elasticsearch indices
//! whose per-request offset and page size are capped.
//!
//! ## Features
//!
//! - **Direction selection**: windows near the tail are read in reverse
//! - **Offset reduction**: a large `from` becomes a small one plus a range
//!   filter, found by binary search over sort values with `_count` probes
//! - **Capped batching**: large pages are read as consecutive cursor batches
//! - **Pluggable backends**: a live cluster over HTTP, or an in-memory index
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use es_deep_pager::{DeepPager, ElasticsearchBackend, HttpClient, PageRequest, Settings};
//!
//! #[tokio::main]
//! async fn main() -> es_deep_pager::Result<()> {
//!     let settings = Settings::load("pager.yaml")?;
//!     let client = HttpClient::with_auth(settings.http_config(), settings.auth_config())?;
//!     let pager = DeepPager::with_config(ElasticsearchBackend::new(client), settings.pager)?;
//!
//!     let request = PageRequest::new("test_data_*", "id")
//!         .from(999_995)
//!         .size(10);
//!     let hits = pager.search(&request).await?;
//!     println!("{}", hits.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         DeepPager                           │
//! │  validate → select_direction → OffsetReducer → BatchFetcher │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────┬────────────────────┐
//! │    Query     │      SearchBackend      │     Transport      │
//! ├──────────────┼─────────────────────────┼────────────────────┤
//! │ MatchAll     │ ElasticsearchBackend    │ HttpClient         │
//! │ Range        │ MemoryBackend           │ Auth               │
//! │ And / DSL    │                         │ Rate Limit         │
//! └──────────────┴─────────────────────────┴────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query model and DSL rendering
pub mod query;

/// Search backends
pub mod backend;

/// Deep pagination pipeline
pub mod pagination;

/// HTTP client with rate limiting
pub mod http;

/// Authentication implementations
pub mod auth;

/// Settings file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use backend::{Document, ElasticsearchBackend, MemoryBackend, SearchBackend};
pub use config::Settings;
pub use http::HttpClient;
pub use pagination::{DeepPager, PageRequest, PagerConfig};
pub use query::{Query, RangeBound};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
