use crate::western::{normalize_longitude, sign_name, sign_symbol, Dignity, Sign};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One point record as handed over by the ephemeris library.
///
/// Field names follow the library's attribute names. Everything is optional
/// here; the normalizer decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Absolute ecliptic longitude, degrees
    #[serde(default)]
    pub abs_pos: Option<f64>,
    /// Sign ordinal, Aries = 0
    #[serde(default)]
    pub sign_num: Option<i64>,
    /// Degree within the sign
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub retrograde: Option<bool>,
}

/// A full set of raw records for one chart moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChart {
    /// External point name ("sun", "mean_node", ...) -> record
    #[serde(default)]
    pub points: BTreeMap<String, RawPoint>,
    /// "first_house".."twelfth_house" (or "1".."12") -> record
    #[serde(default)]
    pub houses: BTreeMap<String, RawPoint>,
}

/// A named point on the ecliptic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    pub name: String,
    /// Full sign name, or "Unknown"
    pub sign: String,
    #[serde(rename = "sign_num")]
    pub sign_index: i64,
    pub sign_symbol: String,
    #[serde(rename = "longitude")]
    pub absolute_longitude: f64,
    #[serde(rename = "deg_within_sign")]
    pub degree_in_sign: f64,
    pub is_retrograde: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dignity: Option<Dignity>,
}

impl CelestialPoint {
    pub fn new(
        name: impl Into<String>,
        absolute_longitude: f64,
        sign_index: i64,
        degree_in_sign: f64,
        is_retrograde: bool,
    ) -> Self {
        Self {
            name: name.into(),
            sign: sign_name(sign_index).to_string(),
            sign_index,
            sign_symbol: sign_symbol(sign_index).to_string(),
            absolute_longitude,
            degree_in_sign,
            is_retrograde,
            dignity: None,
        }
    }

    /// Build a point whose sign and in-sign degree are derived from the longitude.
    ///
    /// A non-finite longitude resolves to the unknown sign.
    pub fn from_longitude(name: impl Into<String>, longitude: f64, is_retrograde: bool) -> Self {
        let lon = normalize_longitude(longitude);
        let sign_index = Sign::from_longitude(lon).map_or(-1, |sign| sign.index() as i64);
        Self::new(name, lon, sign_index, lon % 30.0, is_retrograde)
    }

    pub fn resolved_sign(&self) -> Option<Sign> {
        Sign::from_index(self.sign_index)
    }

    pub fn with_dignity(mut self, dignity: Dignity) -> Self {
        self.dignity = Some(dignity);
        self
    }
}

/// One of the twelve house cusps. Cusps have no motion, so no retrograde flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    #[serde(rename = "cusp")]
    pub cusp_number: u8,
    pub sign: String,
    #[serde(rename = "sign_num")]
    pub sign_index: i64,
    #[serde(rename = "position")]
    pub degree_in_sign: f64,
    #[serde(rename = "absolute_position")]
    pub absolute_longitude: f64,
}

impl HouseCusp {
    pub fn from_point(cusp_number: u8, point: CelestialPoint) -> Self {
        Self {
            cusp_number,
            sign: point.sign,
            sign_index: point.sign_index,
            degree_in_sign: point.degree_in_sign,
            absolute_longitude: point.absolute_longitude,
        }
    }
}

/// Canonical point name -> point. Duplicate names overwrite (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet {
    points: BTreeMap<String, CelestialPoint>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, point: CelestialPoint) -> Option<CelestialPoint> {
        self.points.insert(point.name.clone(), point)
    }

    pub fn get(&self, name: &str) -> Option<&CelestialPoint> {
        self.points.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialPoint> {
        self.points.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    /// Keep only the named points. An empty list keeps everything.
    pub fn retain_names(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }
        self.points.retain(|name, _| names.iter().any(|n| n == name));
    }
}

impl FromIterator<CelestialPoint> for PointSet {
    fn from_iter<T: IntoIterator<Item = CelestialPoint>>(iter: T) -> Self {
        let mut set = PointSet::new();
        for point in iter {
            set.insert(point);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a CelestialPoint;
    type IntoIter = std::collections::btree_map::Values<'a, String, CelestialPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.values()
    }
}
