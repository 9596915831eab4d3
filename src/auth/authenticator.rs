//! Authenticator implementation
//!
//! Applies the configured credentials to request builders.

use super::types::AuthConfig;
use base64::Engine as _;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::ApiKey { id, key } => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{id}:{key}"));
                req.header("Authorization", format!("ApiKey {encoded}"))
            }
        }
    }
}
