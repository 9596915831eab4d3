//! HTTP client module
//!
//! Transport used by the Elasticsearch backend.
//!
//! # Features
//!
//! - **Authentication**: Integration with auth module
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Error Classification**: Non-success statuses become `Error::HttpStatus`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
