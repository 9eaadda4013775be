//! Habitability scoring and ranking.
//!
//! The score approximates an Earth-similarity index with three independent
//! step functions: Earth-like radius, Earth-like mass, and a roughly
//! one-year orbit. Each band contributes its full weight or nothing.

mod rank;

pub use rank::rank;

use crate::types::PlanetRecord;

/// An inclusive range on one physical quantity, worth `weight` points.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub weight: u8,
}

impl Band {
    /// Points contributed by `value`. Absent values contribute nothing.
    pub fn points(&self, value: Option<f64>) -> u8 {
        match value {
            Some(v) if v >= self.min && v <= self.max => self.weight,
            _ => 0,
        }
    }
}

/// Earth radii.
pub const RADIUS_BAND: Band = Band {
    min: 0.8,
    max: 1.5,
    weight: 40,
};

/// Earth masses.
pub const MASS_BAND: Band = Band {
    min: 0.5,
    max: 5.0,
    weight: 30,
};

/// Days.
pub const ORBITAL_PERIOD_BAND: Band = Band {
    min: 200.0,
    max: 400.0,
    weight: 30,
};

/// Highest attainable score.
pub const MAX_SCORE: u8 = RADIUS_BAND.weight + MASS_BAND.weight + ORBITAL_PERIOD_BAND.weight;

/// Compute the habitability score of a planet (0..=100).
pub fn habitability_score(planet: &PlanetRecord) -> u8 {
    RADIUS_BAND.points(planet.radius_earth)
        + MASS_BAND.points(planet.mass_earth)
        + ORBITAL_PERIOD_BAND.points(planet.orbital_period_days)
}
