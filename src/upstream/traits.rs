//! Upstream trait seam.
//!
//! The service only talks to the upstream through [`SpaceDatabase`], which
//! lets decorators (retry) stack on top of the HTTP client and lets tests
//! substitute counting or failing stubs.

use async_trait::async_trait;

use crate::Result;
use crate::types::{QueryParams, RawPayload};

/// A source of raw planet records.
#[async_trait]
pub trait SpaceDatabase: Send + Sync {
    /// Name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch the records behind `endpoint` (e.g. `/exoplanets`), forwarding
    /// `params` as query parameters.
    ///
    /// Timeouts and dropped connections must surface as transient errors
    /// (see [`AstraError::is_transient()`](crate::AstraError::is_transient))
    /// so the retry decorator can act on them.
    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload>;
}
