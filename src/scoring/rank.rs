//! Ordering planets by habitability.

use std::cmp::Reverse;

use super::habitability_score;
use crate::types::{PlanetRecord, ScoredPlanet};

/// Score every planet and order them best first.
///
/// Uses a stable sort: planets with equal scores keep their input order.
pub fn rank(planets: Vec<PlanetRecord>) -> Vec<ScoredPlanet> {
    let mut scored: Vec<ScoredPlanet> = planets
        .into_iter()
        .map(|planet| ScoredPlanet {
            habitability_score: habitability_score(&planet),
            planet,
        })
        .collect();
    scored.sort_by_key(|p| Reverse(p.habitability_score));
    scored
}
