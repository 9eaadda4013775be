//! Caching subsystem.
//!
//! [`FetchCache`] memoizes raw upstream payloads keyed on endpoint plus
//! query parameters. It is owned by each [`AstraService`](crate::AstraService)
//! instance rather than living in process-global state, so tests get a fresh
//! cache per service.
//!
//! Payloads are stored before normalization and scoring. Ranking is
//! recomputed on every hit, so changing the scoring rules never requires
//! invalidating the cache.

mod fetch;

pub use fetch::{CacheConfig, CacheKey, FetchCache};
