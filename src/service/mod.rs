//! The Astra service: fetch, normalize, score, rank.

mod astra;
mod builder;

pub use astra::{AstraService, SUGGESTION_COUNT, SUGGESTION_FETCH_LIMIT};
pub use builder::{Astra, AstraBuilder, DEFAULT_EXOPLANETS_ENDPOINT, DEFAULT_SEARCH_ENDPOINT};
