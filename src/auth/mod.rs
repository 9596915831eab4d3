//! Authentication module
//!
//! Supports: Basic, Bearer, Elasticsearch API keys
//!
//! The `Authenticator` decorates every outgoing request with the
//! configured credentials.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
