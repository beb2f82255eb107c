//! Provider configuration: which base URL serves which resource, plus
//! request-level knobs shared by every call.
//!
//! ```rust
//! use microrest_core::ProviderConfig;
//!
//! let config = ProviderConfig::from_json_str(
//!     r#"{
//!         "resources": {
//!             "posts": "https://posts.example.test/posts",
//!             "users": "https://users.example.test/users"
//!         },
//!         "timeout_ms": 5000
//!     }"#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.resources.base_url("posts"), Some("https://posts.example.test/posts"));
//! assert_eq!(config.fallback_total, 10);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_FALLBACK_TOTAL: u64 = 10;

/// Resource name to base URL mapping. Fixed once the provider is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMap(BTreeMap<String, String>);

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(
        mut self,
        resource: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        self.0.insert(resource.into(), base_url.into());
        self
    }

    pub fn base_url(&self, resource: &str) -> Option<&str> {
        self.0.get(resource).map(String::as_str)
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::NoResources);
        }
        for (resource, base_url) in &self.0 {
            if resource.trim().is_empty() {
                return Err(ConfigError::EmptyResourceName);
            }
            if base_url.trim().is_empty() {
                return Err(ConfigError::EmptyBaseUrl {
                    resource: resource.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(resource, base_url)| (resource.into(), base_url.into()))
                .collect(),
        )
    }
}

/// Settings for a [`RestProvider`](crate::RestProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub resources: ResourceMap,
    /// Per-request timeout handed to the transport.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Total reported when `Content-Range` is present but unparsable.
    #[serde(default = "default_fallback_total")]
    pub fallback_total: u64,
    /// Extra headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn new(resources: ResourceMap) -> Self {
        Self {
            resources,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            fallback_total: DEFAULT_FALLBACK_TOTAL,
            headers: BTreeMap::new(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_fallback_total(mut self, fallback_total: u64) -> Self {
        self.fallback_total = fallback_total;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resources.validate()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

const fn default_fallback_total() -> u64 {
    DEFAULT_FALLBACK_TOTAL
}
