//! Public types for the Astra API.

mod limit;
mod planet;

pub use limit::Limit;
pub use planet::{PlanetRecord, QueryParams, RawPayload, RawRecord, ScoredPlanet, UNKNOWN};
