//! Astra - habitability-ranking proxy for a space object database
//!
//! This crate fetches planet records from an upstream "space object
//! database", normalizes them into a fixed shape, scores each one with a
//! simple Earth-similarity heuristic, and serves the ranked results over
//! HTTP.
//!
//! The pipeline is: upstream fetch (with bounded retries) → optional
//! bounded cache of raw payloads → normalization → scoring → ranking.
//!
//! # Example
//!
//! ```rust,no_run
//! use astra::{Astra, Limit};
//!
//! #[tokio::main]
//! async fn main() -> astra::Result<()> {
//!     let service = Astra::builder()
//!         .base_url("https://space-db.example")
//!         .build()?;
//!
//!     for planet in service.exoplanets(Limit::new(10)?).await? {
//!         println!("{} scores {}", planet.planet.name, planet.habitability_score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod convert;
pub mod error;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod telemetry;
pub mod types;
pub mod upstream;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheKey, FetchCache};
pub use error::{AstraError, Result};
pub use scoring::{habitability_score, rank};
pub use service::{Astra, AstraBuilder, AstraService};
pub use upstream::{Backoff, RetryConfig, RetryingSpaceDatabase, Sleeper, SpaceDatabase, SpaceDbClient};

pub use types::{Limit, PlanetRecord, QueryParams, RawPayload, RawRecord, ScoredPlanet};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
