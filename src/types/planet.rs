//! Planet records as served by Astra.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One untyped record exactly as the upstream returned it.
pub type RawRecord = serde_json::Value;

/// An upstream listing: a JSON array of untyped records.
pub type RawPayload = Vec<RawRecord>;

/// Query parameters forwarded to the upstream.
///
/// Ordered so that two parameter sets with the same pairs compare (and hash)
/// equal regardless of insertion order.
pub type QueryParams = BTreeMap<String, String>;

/// Placeholder for missing textual fields.
pub const UNKNOWN: &str = "Unknown";

/// A planet record in its fixed, defaulted shape.
///
/// Textual fields are always populated (`"Unknown"` when the upstream had
/// nothing usable). Physical quantities stay `None` when absent; they are
/// serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub host_star: String,
    /// Radius in Earth radii.
    pub radius_earth: Option<f64>,
    /// Mass in Earth masses.
    pub mass_earth: Option<f64>,
    pub orbital_period_days: Option<f64>,
    pub classification: String,
}

impl Default for PlanetRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            host_star: UNKNOWN.to_string(),
            radius_earth: None,
            mass_earth: None,
            orbital_period_days: None,
            classification: UNKNOWN.to_string(),
        }
    }
}

impl PlanetRecord {
    /// Create a record with the given name and every other field defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_host_star(mut self, host_star: impl Into<String>) -> Self {
        self.host_star = host_star.into();
        self
    }

    pub fn with_radius(mut self, radius_earth: f64) -> Self {
        self.radius_earth = Some(radius_earth);
        self
    }

    pub fn with_mass(mut self, mass_earth: f64) -> Self {
        self.mass_earth = Some(mass_earth);
        self
    }

    pub fn with_orbital_period(mut self, days: f64) -> Self {
        self.orbital_period_days = Some(days);
        self
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }
}

/// A planet annotated with its habitability score.
///
/// Serializes flat: `habitability_score` appears next to the record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlanet {
    #[serde(flatten)]
    pub planet: PlanetRecord,
    pub habitability_score: u8,
}
