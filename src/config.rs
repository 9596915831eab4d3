//! Settings file
//!
//! Cluster connection and pager tunables, loaded from YAML (or JSON when
//! the file extension is `.json`):
//!
//! ```yaml
//! url: http://localhost:9200
//! auth: { type: basic, username: elastic, password: secret }
//! timeout_secs: 30
//! headers: { X-Opaque-Id: pager }
//! rate_limit: { requests_per_second: 50, burst_size: 50 }
//! pager: { max_from: 2000, max_size: 3000 }
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PagerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Connection and pager settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Cluster base URL
    pub url: String,

    /// Credentials sent with every request
    #[serde(default)]
    pub auth: AuthConfig,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Client-side request rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Per-call caps
    #[serde(default)]
    pub pager: PagerConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Settings for `url` with every other field defaulted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: AuthConfig::None,
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
            rate_limit: None,
            pager: PagerConfig::default(),
        }
    }

    /// Load and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read settings file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading settings");

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate YAML settings
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate JSON settings
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the URL and pager caps
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be positive"));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        self.pager.validate()
    }

    /// Transport configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.url.clone())
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(rate_limit) = &self.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder.build()
    }

    /// Credentials configuration
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.clone()
    }
}
