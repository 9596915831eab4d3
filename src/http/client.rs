//! HTTP client for the search cluster
//!
//! Provides the transport the Elasticsearch backend talks through:
//! - Base URL resolution for index-relative paths
//! - Authentication and default headers on every request
//! - Optional rate limiting
//! - Status classification into backend errors
//!
//! Every call is a single attempt. A failed request surfaces immediately.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("es-deep-pager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with authentication and optional rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(auth_config),
            rate_limiter,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a single request, failing on any non-success status
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<Response> {
        let full_url = self.build_url(path);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), &full_url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            trace!("{} {} body: {}", method, full_url, body);
            req = req.json(body);
        }
        req = self.authenticator.apply(req);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {} {}", method, full_url);
        Ok(response)
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<T> {
        let response = self.request(method, path, body).await?;
        response
            .json()
            .await
            .map_err(|e| Error::decode(format!("invalid JSON response from {path}: {e}")))
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &JsonValue) -> Result<T> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// GET and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, None).await
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("auth", self.authenticator.config())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
