//! Access to the upstream space object database.
//!
//! - [`traits::SpaceDatabase`]: the seam every upstream implements.
//! - [`http::SpaceDbClient`]: the reqwest-backed HTTP client.
//! - [`retry::RetryingSpaceDatabase`]: decorator adding bounded retries on
//!   transient failures.

pub mod http;
pub mod retry;
pub mod traits;

pub use http::SpaceDbClient;
pub use retry::{Backoff, RetryConfig, RetryingSpaceDatabase, Sleeper, TokioSleeper};
pub use traits::SpaceDatabase;
