//! Bounded LRU cache of raw upstream payloads.

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tracing::debug;

use crate::Result;
use crate::telemetry;
use crate::types::{QueryParams, RawPayload};

/// Default maximum number of cached payloads.
pub const DEFAULT_MAX_ENTRIES: u64 = 32;

/// Configuration for the fetch cache.
///
/// ```rust
/// # use astra::CacheConfig;
/// let config = CacheConfig::new().max_entries(64);
/// assert_eq!(config.max_entries, 64);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached payloads. Default: 32.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }
}

/// Identity of a cached fetch: the upstream endpoint and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub endpoint: String,
    pub params: QueryParams,
}

impl CacheKey {
    pub fn new(endpoint: impl Into<String>, params: QueryParams) -> Self {
        Self {
            endpoint: endpoint.into(),
            params,
        }
    }
}

/// In-memory cache of raw upstream payloads.
///
/// Bounded by entry count with least-recently-used eviction. There is no
/// TTL: an entry lives until it is evicted or the process restarts. Safe to
/// share across tasks; concurrent misses on the same key may both reach the
/// upstream, and the last insert wins.
pub struct FetchCache {
    cache: Cache<CacheKey, Arc<RawPayload>>,
}

impl FetchCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { cache }
    }

    /// Return the cached payload for `key`, or run `fetch` and cache its result.
    ///
    /// Errors from `fetch` are returned as-is and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Arc<RawPayload>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RawPayload>>,
    {
        if let Some(payload) = self.get(&key).await {
            return Ok(payload);
        }

        let payload = Arc::new(fetch().await?);
        self.cache.insert(key, Arc::clone(&payload)).await;
        Ok(payload)
    }

    /// Look up a cached payload. Emits cache hit/miss metrics.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<RawPayload>> {
        match self.cache.get(key).await {
            Some(payload) => {
                debug!(endpoint = %key.endpoint, params = ?key.params, "fetch cache hit");
                metrics::counter!(telemetry::CACHE_HITS_TOTAL,
                    "endpoint" => key.endpoint.clone(),
                )
                .increment(1);
                Some(payload)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL,
                    "endpoint" => key.endpoint.clone(),
                )
                .increment(1);
                None
            }
        }
    }

    /// Number of entries currently in the cache.
    ///
    /// Eventually consistent; call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first for an exact figure.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush pending eviction bookkeeping.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Whether `key` is present, without touching its recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
