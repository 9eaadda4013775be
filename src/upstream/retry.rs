//! Retry configuration, delay calculation, and the retrying decorator.
//!
//! Provides [`RetryConfig`] for controlling retry behaviour and
//! [`RetryingSpaceDatabase`], which wraps any [`SpaceDatabase`] with
//! automatic retry on transient errors. Waiting goes through a [`Sleeper`]
//! so tests can observe delays without real time passing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::traits::SpaceDatabase;
use crate::telemetry;
use crate::types::{QueryParams, RawPayload};
use crate::{AstraError, Result};

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// `delay * 2^n`, capped at `max_delay`.
    Exponential { max_delay: Duration },
}

/// Configuration for retry behaviour on transient errors.
///
/// Defaults to three attempts in total with a fixed 5 second pause, which
/// gives a cold-starting upstream time to wake up:
///
/// ```rust
/// # use astra::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .delay(Duration::from_secs(3));
/// assert_eq!(config.delay_for_attempt(3), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Delay before the first retry. Default: 5s.
    pub delay: Duration,
    /// Default: [`Backoff::Fixed`].
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request). Clamped to at least 1.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Set the delay before the first retry.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Calculate the delay after a failed attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { max_delay } => self
                .delay
                .saturating_mul(2u32.saturating_pow(attempt))
                .min(max_delay),
        }
    }
}

// ============================================================================
// Sleeping
// ============================================================================

/// Waits between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ============================================================================
// RetryingSpaceDatabase
// ============================================================================

/// Decorator that wraps a [`SpaceDatabase`] with retry logic.
///
/// On transient errors (as classified by [`AstraError::is_transient()`]),
/// retries up to `config.max_attempts`, sleeping between attempts. When the
/// budget runs out the last failure is reported as
/// [`AstraError::UpstreamUnavailable`]. Permanent errors are returned
/// immediately.
pub struct RetryingSpaceDatabase {
    inner: Arc<dyn SpaceDatabase>,
    config: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryingSpaceDatabase {
    /// Wrap an upstream with retry logic, sleeping on the tokio timer.
    pub fn new(inner: Arc<dyn SpaceDatabase>, config: RetryConfig) -> Self {
        Self::with_sleeper(inner, config, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        inner: Arc<dyn SpaceDatabase>,
        config: RetryConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            inner,
            config,
            sleeper,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[async_trait]
impl SpaceDatabase for RetryingSpaceDatabase {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_err = None;
        for attempt in 0..max_attempts {
            match self.inner.fetch(endpoint, params).await {
                Ok(payload) => return Ok(payload),
                Err(e) if e.is_transient() => {
                    if attempt + 1 < max_attempts {
                        let delay = self.config.delay_for_attempt(attempt);
                        metrics::counter!(telemetry::RETRIES_TOTAL,
                            "endpoint" => endpoint.to_owned(),
                        )
                        .increment(1);
                        warn!(
                            upstream = self.inner.name(),
                            endpoint,
                            attempt = attempt + 1,
                            max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "retrying after transient error"
                        );
                        self.sleeper.sleep(delay).await;
                    }
                    last_err = Some(e);
                }
                Err(e) => {
                    warn!(upstream = self.inner.name(), endpoint, error = %e, "upstream failed");
                    return Err(e);
                }
            }
        }

        let cause = last_err.map_or_else(|| "no attempt made".to_string(), |e| e.to_string());
        warn!(
            upstream = self.inner.name(),
            endpoint,
            attempts = max_attempts,
            %cause,
            "giving up on upstream"
        );
        Err(AstraError::UpstreamUnavailable {
            attempts: max_attempts,
            cause,
        })
    }
}
