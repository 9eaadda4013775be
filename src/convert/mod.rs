//! Conversions from upstream records to astra types.
//!
//! The upstream returns loosely-typed JSON. Normalization never fails:
//! anything missing, empty, or of the wrong JSON type degrades to a default
//! instead of producing an error, so the read path stays total.

use serde_json::Value;

use crate::types::{PlanetRecord, RawRecord, UNKNOWN};

/// Map one upstream record into the fixed [`PlanetRecord`] shape.
///
/// Textual fields fall back to `"Unknown"`; numeric fields pass through as
/// `None` when absent, since scoring treats absence as "band not met".
pub fn normalize_planet(raw: &RawRecord) -> PlanetRecord {
    PlanetRecord {
        name: text_field(raw, "name"),
        host_star: text_field(raw, "host_star"),
        radius_earth: number_field(raw, "radius_earth"),
        mass_earth: number_field(raw, "mass_earth"),
        orbital_period_days: number_field(raw, "orbital_period_days"),
        classification: text_field(raw, "classification"),
    }
}

/// Normalize a whole payload, preserving order.
pub fn normalize_all(raw: &[RawRecord]) -> Vec<PlanetRecord> {
    raw.iter().map(normalize_planet).collect()
}

fn text_field(raw: &RawRecord, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN.to_string(),
    }
}

fn number_field(raw: &RawRecord, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn present_fields_pass_through() {
        let raw = json!({
            "name": "TRAPPIST-1e",
            "host_star": "TRAPPIST-1",
            "radius_earth": 0.92,
            "mass_earth": 0.69,
            "orbital_period_days": 6.1,
            "classification": "Terrestrial"
        });
        let p = normalize_planet(&raw);
        assert_eq!(p.name, "TRAPPIST-1e");
        assert_eq!(p.host_star, "TRAPPIST-1");
        assert_eq!(p.radius_earth, Some(0.92));
        assert_eq!(p.mass_earth, Some(0.69));
        assert_eq!(p.orbital_period_days, Some(6.1));
        assert_eq!(p.classification, "Terrestrial");
    }

    #[test]
    fn missing_text_fields_become_unknown() {
        let p = normalize_planet(&json!({ "radius_earth": 1.0 }));
        assert_eq!(p.name, UNKNOWN);
        assert_eq!(p.host_star, UNKNOWN);
        assert_eq!(p.classification, UNKNOWN);
    }

    #[test]
    fn empty_and_null_text_fields_become_unknown() {
        let p = normalize_planet(&json!({
            "name": "",
            "host_star": null,
            "classification": 42
        }));
        assert_eq!(p.name, UNKNOWN);
        assert_eq!(p.host_star, UNKNOWN);
        assert_eq!(p.classification, UNKNOWN);
    }

    #[test]
    fn missing_numbers_stay_absent() {
        let p = normalize_planet(&json!({
            "name": "X",
            "mass_earth": null,
            "orbital_period_days": "365"
        }));
        assert!(p.radius_earth.is_none());
        assert!(p.mass_earth.is_none());
        assert!(p.orbital_period_days.is_none());
    }

    #[test]
    fn integer_numbers_are_accepted() {
        let p = normalize_planet(&json!({ "orbital_period_days": 365 }));
        assert_eq!(p.orbital_period_days, Some(365.0));
    }

    #[test]
    fn non_object_record_is_all_defaults() {
        assert_eq!(normalize_planet(&json!("garbage")), PlanetRecord::default());
        assert_eq!(normalize_planet(&Value::Null), PlanetRecord::default());
    }

    #[test]
    fn normalize_all_keeps_order() {
        let raw = vec![json!({ "name": "b" }), json!({ "name": "a" })];
        let names: Vec<_> = normalize_all(&raw).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
