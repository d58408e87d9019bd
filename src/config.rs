//! Provider configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Public OpenF1 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";

/// Default response cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Settings for [`OpenF1Provider`](crate::providers::openf1::OpenF1Provider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Directory for cached responses (created if absent)
    pub cache_dir: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            timeout: Duration::from_secs(60),
        }
    }
}

impl ProviderConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
