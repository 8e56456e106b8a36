//! Reshapes externally computed point records into [`CelestialPoint`]s.
//!
//! This is the single validation step between the ephemeris library and the
//! rest of the crate: records without a usable longitude are dropped here,
//! with a diagnostic, and never reach the calculators.

use crate::error::ChartError;
use crate::points::types::{CelestialPoint, HouseCusp, PointSet, RawChart, RawPoint};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

lazy_static::lazy_static! {
    static ref CANONICAL_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("sun", "Sun"),
        ("moon", "Moon"),
        ("mercury", "Mercury"),
        ("venus", "Venus"),
        ("mars", "Mars"),
        ("jupiter", "Jupiter"),
        ("saturn", "Saturn"),
        ("uranus", "Uranus"),
        ("neptune", "Neptune"),
        ("pluto", "Pluto"),
        ("mean_node", "Mean_Node"),
        ("true_node", "True_Node"),
        ("mean_south_node", "Mean_South_Node"),
        ("true_south_node", "True_South_Node"),
        ("chiron", "Chiron"),
        ("mean_lilith", "Mean_Lilith"),
        ("ascendant", "Ascendant"),
        ("medium_coeli", "Medium_Coeli"),
        ("descendant", "Descendant"),
        ("imum_coeli", "IC"),
    ]);
}

/// External house keys, in cusp order.
const HOUSE_KEYS: [&str; 12] = [
    "first_house",
    "second_house",
    "third_house",
    "fourth_house",
    "fifth_house",
    "sixth_house",
    "seventh_house",
    "eighth_house",
    "ninth_house",
    "tenth_house",
    "eleventh_house",
    "twelfth_house",
];

/// Map an external point key to the canonical vocabulary.
///
/// Unmapped keys pass through with their first letter capitalized.
pub fn canonical_name(external: &str) -> String {
    match CANONICAL_NAMES.get(external) {
        Some(name) => (*name).to_string(),
        None => capitalize_first(external),
    }
}

/// Output of the normalizer: usable points plus what was dropped and why.
#[derive(Debug, Clone, Default)]
pub struct NormalizedPoints {
    pub points: PointSet,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedChart {
    pub points: PointSet,
    /// Ordered by cusp number
    pub houses: Vec<HouseCusp>,
    pub diagnostics: Vec<String>,
}

/// Convert one record, or explain why it cannot be used.
pub fn normalize_point(name: &str, raw: &RawPoint) -> Result<CelestialPoint, String> {
    let longitude = match raw.abs_pos {
        Some(lon) if lon.is_finite() => lon,
        Some(lon) => return Err(format!("Point '{}' has non-finite longitude {}", name, lon)),
        None => return Err(format!("Point '{}' missing absolute longitude", name)),
    };
    let sign_index = raw.sign_num.unwrap_or(-1);
    let degree_in_sign = raw
        .position
        .filter(|p| p.is_finite())
        .unwrap_or_else(|| longitude.rem_euclid(30.0));

    Ok(CelestialPoint::new(
        name,
        longitude,
        sign_index,
        degree_in_sign,
        raw.retrograde.unwrap_or(false),
    ))
}

/// Normalize a mapping of external name -> record.
pub fn normalize_points(raw: &BTreeMap<String, RawPoint>) -> NormalizedPoints {
    let mut out = NormalizedPoints::default();

    for (external, record) in raw {
        let name = canonical_name(external);
        match normalize_point(&name, record) {
            Ok(point) => {
                if out.points.insert(point).is_some() {
                    log::debug!("Duplicate canonical point '{}', keeping the last record", name);
                }
            }
            Err(reason) => {
                log::warn!("Skipping point: {}", reason);
                out.diagnostics.push(reason);
            }
        }
    }

    out
}

/// Resolve an external house key to its cusp number.
fn cusp_number(key: &str) -> Option<u8> {
    if let Some(i) = HOUSE_KEYS.iter().position(|k| *k == key) {
        return Some(i as u8 + 1);
    }
    key.parse::<u8>().ok().filter(|n| (1..=12).contains(n))
}

/// Normalize raw house records into cusps ordered by number.
pub fn normalize_houses(raw: &BTreeMap<String, RawPoint>) -> (Vec<HouseCusp>, Vec<String>) {
    let mut cusps: BTreeMap<u8, HouseCusp> = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for (key, record) in raw {
        let Some(number) = cusp_number(key) else {
            let reason = format!("Unrecognized house key '{}'", key);
            log::warn!("Skipping house: {}", reason);
            diagnostics.push(reason);
            continue;
        };
        match normalize_point(&format!("House_{}", number), record) {
            Ok(point) => {
                cusps.insert(number, HouseCusp::from_point(number, point));
            }
            Err(reason) => {
                log::warn!("Skipping house: {}", reason);
                diagnostics.push(reason);
            }
        }
    }

    (cusps.into_values().collect(), diagnostics)
}

pub fn normalize_chart(raw: &RawChart) -> NormalizedChart {
    let NormalizedPoints { points, mut diagnostics } = normalize_points(&raw.points);
    let (houses, house_diagnostics) = normalize_houses(&raw.houses);
    diagnostics.extend(house_diagnostics);

    log::info!(
        "Normalized {} points and {} house cusps ({} skipped)",
        points.len(),
        houses.len(),
        diagnostics.len()
    );

    NormalizedChart { points, houses, diagnostics }
}

impl PointSet {
    /// Validate a persisted planet map (`{ "Sun": { "name": .., "longitude": .. }, .. }`).
    ///
    /// The whole collection is rejected when it is not a map of records that
    /// each carry `name` and `longitude`. Individual records whose longitude is
    /// not a finite number are skipped.
    pub fn from_stored(value: &Value) -> Result<PointSet, ChartError> {
        let map = value.as_object().ok_or_else(|| ChartError::MalformedPoints {
            message: format!("expected a mapping of point records, got {}", json_kind(value)),
        })?;

        let well_formed = map.values().all(|entry| {
            entry.as_object().is_some_and(|record| {
                record.contains_key("name") && record.contains_key("longitude")
            })
        });
        if !well_formed {
            return Err(ChartError::MalformedPoints {
                message: "every point record needs 'name' and 'longitude'".to_string(),
            });
        }

        let mut set = PointSet::new();
        for (key, entry) in map {
            let longitude = entry
                .get("longitude")
                .and_then(Value::as_f64)
                .filter(|lon| lon.is_finite());
            let Some(longitude) = longitude else {
                log::warn!("Skipping stored point '{}': non-numeric longitude", key);
                continue;
            };
            let retrograde = entry
                .get("is_retrograde")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            set.insert(CelestialPoint::from_longitude(key.as_str(), longitude, retrograde));
        }

        Ok(set)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Capitalize first letter of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("mean_node"), "Mean_Node");
        assert_eq!(canonical_name("medium_coeli"), "Medium_Coeli");
        assert_eq!(canonical_name("imum_coeli"), "IC");
        assert_eq!(canonical_name("ceres"), "Ceres");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn test_cusp_number() {
        assert_eq!(cusp_number("first_house"), Some(1));
        assert_eq!(cusp_number("twelfth_house"), Some(12));
        assert_eq!(cusp_number("7"), Some(7));
        assert_eq!(cusp_number("13"), None);
        assert_eq!(cusp_number("attic"), None);
    }
}
