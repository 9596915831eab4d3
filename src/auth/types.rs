//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Elasticsearch API key (`Authorization: ApiKey base64(id:key)`)
    ApiKey {
        /// API key id
        id: String,
        /// API key secret
        key: String,
    },
}

impl AuthConfig {
    /// Create basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check whether any credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            Self::ApiKey { id, .. } => f
                .debug_struct("ApiKey")
                .field("id", id)
                .finish_non_exhaustive(),
        }
    }
}
