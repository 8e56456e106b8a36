use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The named angular relationships the classifier recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Square,
    Trine,
    Sesquiquadrate,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::SemiSextile => "SemiSextile",
            Self::SemiSquare => "SemiSquare",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Sesquiquadrate => "Sesquiquadrate",
            Self::Quincunx => "Quincunx",
            Self::Opposition => "Opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD_ASPECTS
            .iter()
            .map(|(kind, _, _)| *kind)
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnknownAspect {
                name: s.to_string(),
                valid: STANDARD_ASPECTS.iter().map(|(k, _, _)| k.to_string()).collect(),
            })
    }
}

/// (kind, target angle, orb limit), in classification order.
const STANDARD_ASPECTS: [(AspectKind, f64, f64); 9] = [
    (AspectKind::Conjunction, 0.0, 8.0),
    (AspectKind::SemiSextile, 30.0, 2.0),
    (AspectKind::SemiSquare, 45.0, 2.0),
    (AspectKind::Sextile, 60.0, 5.0),
    (AspectKind::Square, 90.0, 7.0),
    (AspectKind::Trine, 120.0, 7.0),
    (AspectKind::Sesquiquadrate, 135.0, 2.0),
    (AspectKind::Quincunx, 150.0, 3.0),
    (AspectKind::Opposition, 180.0, 8.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub target_angle: f64,
    pub orb_limit: f64,
}

/// Ordered aspect table. Order decides the order of multiple matches.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectTable {
    entries: Vec<AspectDefinition>,
}

impl AspectTable {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_ASPECTS
                .iter()
                .map(|(kind, target_angle, orb_limit)| AspectDefinition {
                    kind: *kind,
                    target_angle: *target_angle,
                    orb_limit: *orb_limit,
                })
                .collect(),
        }
    }

    /// Replace the orb limit of one aspect.
    pub fn with_orb(mut self, kind: AspectKind, orb_limit: f64) -> Result<Self, ChartError> {
        if !orb_limit.is_finite() || orb_limit < 0.0 {
            return Err(ChartError::InvalidOrb {
                name: kind.to_string(),
                orb: orb_limit,
            });
        }
        for entry in self.entries.iter_mut().filter(|e| e.kind == kind) {
            entry.orb_limit = orb_limit;
        }
        Ok(self)
    }

    /// Apply orb overrides keyed by aspect name (as found in config files).
    pub fn with_overrides(self, overrides: &BTreeMap<String, f64>) -> Result<Self, ChartError> {
        overrides.iter().try_fold(self, |table, (name, orb)| {
            let kind: AspectKind = name.parse()?;
            table.with_orb(kind, *orb)
        })
    }

    pub fn entries(&self) -> &[AspectDefinition] {
        &self.entries
    }

    pub fn get(&self, kind: AspectKind) -> Option<&AspectDefinition> {
        self.entries.iter().find(|e| e.kind == kind)
    }
}

impl Default for AspectTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// A table entry that matched one angular separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub kind: AspectKind,
    pub target_angle: f64,
    /// Absolute deviation from the target angle, always >= 0
    pub orb: f64,
}

/// A detected aspect between two named points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    #[serde(rename = "p1_name")]
    pub point1_name: String,
    #[serde(rename = "p2_name")]
    pub point2_name: String,
    #[serde(rename = "aspect_name")]
    pub kind: AspectKind,
    #[serde(rename = "aspect_degrees")]
    pub target_angle_degrees: f64,
    pub orb: f64,
}

impl Aspect {
    pub fn from_match(point1: &str, point2: &str, found: AspectMatch) -> Self {
        Self {
            point1_name: point1.to_string(),
            point2_name: point2.to_string(),
            kind: found.kind,
            target_angle_degrees: found.target_angle,
            orb: found.orb,
        }
    }
}

/// Aspect between a transiting point and a natal point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitAspect {
    pub transiting_planet: String,
    pub natal_planet: String,
    pub aspect_name: AspectKind,
    pub aspect_degrees: f64,
    pub orb: f64,
}

impl From<Aspect> for TransitAspect {
    fn from(aspect: Aspect) -> Self {
        Self {
            transiting_planet: aspect.point1_name,
            natal_planet: aspect.point2_name,
            aspect_name: aspect.kind,
            aspect_degrees: aspect.target_angle_degrees,
            orb: aspect.orb,
        }
    }
}

/// Aspect between points of two different natal charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryAspect {
    pub planet1: String,
    pub planet2: String,
    pub aspect_name: AspectKind,
    pub aspect_degrees: f64,
    pub orb: f64,
}

impl From<Aspect> for SynastryAspect {
    fn from(aspect: Aspect) -> Self {
        Self {
            planet1: aspect.point1_name,
            planet2: aspect.point2_name,
            aspect_name: aspect.kind,
            aspect_degrees: aspect.target_angle_degrees,
            orb: aspect.orb,
        }
    }
}
