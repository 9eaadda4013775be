//! Telemetry metric name constants.
//!
//! Centralised metric names for astra operations. The daemon does not
//! install a recorder; embedders may install their own (prometheus, statsd).
//! Without a recorder, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `astra_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint`: upstream endpoint path (e.g. "/exoplanets")
//! - `status`: outcome: "ok" or "error"

/// Total upstream HTTP attempts (each retry counts separately).
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "astra_upstream_requests_total";

/// Upstream attempt duration in seconds.
///
/// Labels: `endpoint`.
pub const UPSTREAM_REQUEST_DURATION_SECONDS: &str = "astra_upstream_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `endpoint`.
pub const RETRIES_TOTAL: &str = "astra_retries_total";

/// Total fetch cache hits.
///
/// Labels: `endpoint`.
pub const CACHE_HITS_TOTAL: &str = "astra_cache_hits_total";

/// Total fetch cache misses.
///
/// Labels: `endpoint`.
pub const CACHE_MISSES_TOTAL: &str = "astra_cache_misses_total";
