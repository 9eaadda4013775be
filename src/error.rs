//! Astra error types

/// Astra error types
#[derive(Debug, thiserror::Error)]
pub enum AstraError {
    // Transient upstream errors (retried by the upstream decorator)
    #[error("upstream timed out: {0}")]
    Timeout(String),

    #[error("upstream connection dropped: {0}")]
    Connection(String),

    /// Retry budget exhausted on transient failures.
    #[error(
        "space database did not respond after {attempts} attempts ({cause}); \
         it may be waking up from a cold start, try again in about 30 seconds"
    )]
    UpstreamUnavailable { attempts: u32, cause: String },

    // Permanent upstream errors
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("upstream API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Request errors
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AstraError {
    /// Whether a fresh attempt against the upstream may succeed.
    ///
    /// Only timeouts and dropped connections qualify. HTTP status failures
    /// and other transport errors fail fast.
    pub fn is_transient(&self) -> bool {
        matches!(self, AstraError::Timeout(_) | AstraError::Connection(_))
    }

    /// HTTP status code this error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            AstraError::Timeout(_)
            | AstraError::Connection(_)
            | AstraError::UpstreamUnavailable { .. } => 504,
            AstraError::NotFound(_) => 404,
            AstraError::InvalidInput(_) => 422,
            AstraError::Upstream(_)
            | AstraError::Api { .. }
            | AstraError::Json(_)
            | AstraError::Configuration(_) => 500,
        }
    }
}

impl From<reqwest::Error> for AstraError {
    fn from(err: reqwest::Error) -> Self {
        let message = describe(&err);
        if err.is_timeout() {
            AstraError::Timeout(message)
        } else if !err.is_connect() && is_connection_drop(&err) {
            AstraError::Connection(message)
        } else {
            AstraError::Upstream(message)
        }
    }
}

/// Render an error followed by each distinct cause in its source chain.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Walk the source chain looking for a reset or aborted socket, or a peer
/// that hung up before sending a complete response.
fn is_connection_drop(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(e) = source {
        if e
            .downcast_ref::<hyper::Error>()
            .is_some_and(hyper::Error::is_incomplete_message)
        {
            return true;
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::ConnectionAborted
            );
        }
        source = e.source();
    }
    false
}

/// Result type alias for Astra operations
pub type Result<T> = std::result::Result<T, AstraError>;
