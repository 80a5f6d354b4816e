//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::ConfigError;

/// Retry behavior for page keys whose fetch already failed or is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// A claimed page key stays blocked until explicitly released via
    /// `StorefrontClient::allow_refetch`.
    #[default]
    Manual,

    /// A claimed page key becomes fetchable again once its ledger entry is
    /// older than the given duration.
    Ttl(Duration),
}

/// Configuration for [`StorefrontClient`](crate::StorefrontClient).
#[derive(Debug, Clone)]
pub struct Config {
    /// Product list endpoint base, e.g. `https://host/api/products/v1`.
    pub base_url: String,

    /// API key, the first path segment after the base.
    pub api_key: String,

    /// Items requested per page, 1..=[`MAX_PAGE_SIZE`].
    ///
    /// Must stay constant for the life of a catalog: the next page number
    /// is derived from the accumulated item count.
    pub page_size: u32,

    /// Request timeout for page and image downloads.
    pub timeout: Duration,

    /// Root directory for the page and image stores.
    pub data_dir: PathBuf,

    /// Retry policy for claimed page keys.
    pub retry: RetryPolicy,
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            data_dir: data_dir.into(),
            retry: RetryPolicy::Manual,
        }
    }

    /// Set the number of items requested per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Reject configurations the core would silently misbehave on. The
    /// page size in particular is never clamped downstream.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange(self.page_size));
        }
        Ok(())
    }
}
