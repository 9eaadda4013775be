//! Builder for configuring service instances

use std::sync::Arc;
use std::time::Duration;

use super::AstraService;
use crate::Result;
use crate::cache::{CacheConfig, FetchCache};
use crate::upstream::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::upstream::{RetryConfig, RetryingSpaceDatabase, Sleeper, SpaceDatabase, SpaceDbClient};

/// Default upstream endpoint listing exoplanets.
pub const DEFAULT_EXOPLANETS_ENDPOINT: &str = "/exoplanets";

/// Default upstream endpoint for name search.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "/search";

/// Main entry point for creating service instances.
pub struct Astra;

impl Astra {
    /// Create a new builder for configuring the service.
    pub fn builder() -> AstraBuilder {
        AstraBuilder::new()
    }
}

/// Builder for configuring service instances.
///
/// ```rust,no_run
/// # use astra::{Astra, RetryConfig};
/// # use std::time::Duration;
/// let service = Astra::builder()
///     .base_url("https://space-db.example")
///     .timeout(Duration::from_secs(30))
///     .retry(RetryConfig::new().delay(Duration::from_secs(3)))
///     .build()?;
/// # Ok::<(), astra::AstraError>(())
/// ```
pub struct AstraBuilder {
    base_url: String,
    timeout: Duration,
    upstream: Option<Arc<dyn SpaceDatabase>>,
    retry: RetryConfig,
    sleeper: Option<Arc<dyn Sleeper>>,
    cache: CacheConfig,
    exoplanets_endpoint: String,
    search_endpoint: String,
}

impl AstraBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            upstream: None,
            retry: RetryConfig::default(),
            sleeper: None,
            cache: CacheConfig::default(),
            exoplanets_endpoint: DEFAULT_EXOPLANETS_ENDPOINT.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Base URL of the space object database.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Per-attempt upstream timeout (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom upstream instead of the HTTP client.
    ///
    /// The retry policy still applies on top of it. `base_url` and `timeout`
    /// are ignored.
    pub fn upstream(mut self, upstream: Arc<dyn SpaceDatabase>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    /// Retry policy for transient upstream failures.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// How to wait between retries (default: the tokio timer).
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Fetch cache configuration.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    pub fn exoplanets_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.exoplanets_endpoint = endpoint.into();
        self
    }

    pub fn search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self
    }

    /// Build the service.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<AstraService> {
        let inner: Arc<dyn SpaceDatabase> = match self.upstream {
            Some(upstream) => upstream,
            None => Arc::new(SpaceDbClient::with_timeout(self.base_url, self.timeout)?),
        };

        let upstream = match self.sleeper {
            Some(sleeper) => RetryingSpaceDatabase::with_sleeper(inner, self.retry, sleeper),
            None => RetryingSpaceDatabase::new(inner, self.retry),
        };

        Ok(AstraService::new(
            Arc::new(upstream),
            FetchCache::new(&self.cache),
            self.exoplanets_endpoint,
            self.search_endpoint,
        ))
    }
}

impl Default for AstraBuilder {
    fn default() -> Self {
        Self::new()
    }
}
