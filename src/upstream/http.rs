//! HTTP client for the space object database.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::traits::SpaceDatabase;
use crate::telemetry;
use crate::types::{QueryParams, RawPayload};
use crate::{AstraError, Result};

/// Default base URL for the space object database.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Default per-attempt timeout. Generous, because a dormant upstream can take
/// a long time to wake.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the space object database HTTP API.
///
/// Performs a single attempt per call; wrap it in
/// [`RetryingSpaceDatabase`](super::RetryingSpaceDatabase) for retries.
#[derive(Clone)]
pub struct SpaceDbClient {
    http: Client,
    base_url: String,
}

impl SpaceDbClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-attempt timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AstraError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    async fn fetch_once(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload> {
        let url = self.url(endpoint);
        debug!(%url, ?params, "fetching from space database");

        let response = self.http.get(&url).query(params).send().await?;
        check_status(&response)?;

        let kind = match response.json::<Value>().await? {
            Value::Array(records) => return Ok(records),
            Value::Object(_) => "an object",
            Value::String(_) => "a string",
            Value::Number(_) => "a number",
            Value::Bool(_) => "a boolean",
            Value::Null => "null",
        };
        Err(AstraError::Upstream(format!(
            "unexpected payload from {endpoint}: expected a JSON array, got {kind}"
        )))
    }
}

/// Map a non-2xx response to an error.
fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(AstraError::Api {
        status: status.as_u16(),
        message: format!("space database returned {status}"),
    })
}

#[async_trait]
impl SpaceDatabase for SpaceDbClient {
    fn name(&self) -> &str {
        "space-db"
    }

    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload> {
        let start = Instant::now();
        let result = self.fetch_once(endpoint, params).await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::UPSTREAM_REQUEST_DURATION_SECONDS,
            "endpoint" => endpoint.to_owned(),
        )
        .record(start.elapsed().as_secs_f64());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = SpaceDbClient::new("http://db.example/").unwrap();
        assert_eq!(client.base_url(), "http://db.example");
        assert_eq!(client.url("/exoplanets"), "http://db.example/exoplanets");
    }

    #[test]
    fn endpoint_without_leading_slash() {
        let client = SpaceDbClient::new("http://db.example").unwrap();
        assert_eq!(client.url("search"), "http://db.example/search");
    }
}
