//! Natal chart aggregation: element and mode distribution, dignities, and
//! assembly of the full natal report.

use crate::aspects::{Aspect, AspectClassifier};
use crate::chart::info::BirthData;
use crate::chart::SOURCE_UNAVAILABLE;
use crate::points::{normalize_chart, HouseCusp, PointSet, RawChart};
use crate::western::{
    dignity_of, tally_signs, Dignity, ElementCounts, ModeCounts, Sign, UNKNOWN_SIGN_NAME,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics over a completed point set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalSummary {
    /// Points with their dignity tag filled in
    pub points: PointSet,
    pub element_counts: ElementCounts,
    pub mode_counts: ModeCounts,
}

/// Derive element/mode counts and a dignity for every point.
///
/// Points whose sign is unknown are left out of the counts and are Peregrine.
pub fn aggregate(points: &PointSet) -> NatalSummary {
    let (element_counts, mode_counts) = tally_signs(points.iter().map(|p| p.resolved_sign()));

    let points = points
        .iter()
        .map(|p| {
            let dignity = dignity_of(&p.name, p.resolved_sign());
            p.clone().with_dignity(dignity)
        })
        .collect();

    NatalSummary {
        points,
        element_counts,
        mode_counts,
    }
}

/// Full natal chart report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub info: BirthData,
    pub planets: PointSet,
    pub houses: Vec<HouseCusp>,
    pub aspects: Vec<Aspect>,
    pub element_counts: ElementCounts,
    pub mode_counts: ModeCounts,
    pub sun_sign: String,
    pub ascendant_sign: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
    pub calculation_error: Option<String>,
}

impl NatalChart {
    /// Assemble a natal chart from raw upstream records.
    ///
    /// `raw == None` means the ephemeris integration produced nothing; the
    /// result is then empty and error-tagged.
    pub fn assemble(
        info: BirthData,
        raw: Option<&RawChart>,
        classifier: &AspectClassifier,
    ) -> Self {
        let Some(raw) = raw else {
            log::warn!("No ephemeris data for '{}', returning empty natal chart", info.name);
            return Self::unavailable(info, SOURCE_UNAVAILABLE);
        };

        let normalized = normalize_chart(raw);
        let summary = aggregate(&normalized.points);
        let aspects = classifier.intra_aspects(&summary.points);

        let sign_of = |name: &str| {
            summary
                .points
                .get(name)
                .and_then(|p| p.resolved_sign())
                .map_or(UNKNOWN_SIGN_NAME, Sign::name)
                .to_string()
        };
        let sun_sign = sign_of("Sun");
        let ascendant_sign = sign_of("Ascendant");

        log::info!(
            "Calculated natal chart for '{}': {} points, {} houses, {} aspects",
            info.name,
            summary.points.len(),
            normalized.houses.len(),
            aspects.len()
        );

        Self {
            info,
            planets: summary.points,
            houses: normalized.houses,
            aspects,
            element_counts: summary.element_counts,
            mode_counts: summary.mode_counts,
            sun_sign,
            ascendant_sign,
            diagnostics: normalized.diagnostics,
            calculation_error: None,
        }
    }

    /// Empty chart carrying an error string.
    pub fn unavailable(info: BirthData, error: impl Into<String>) -> Self {
        let (element_counts, mode_counts) = tally_signs(std::iter::empty::<Option<Sign>>());
        Self {
            info,
            planets: PointSet::new(),
            houses: Vec::new(),
            aspects: Vec::new(),
            element_counts,
            mode_counts,
            sun_sign: UNKNOWN_SIGN_NAME.to_string(),
            ascendant_sign: UNKNOWN_SIGN_NAME.to_string(),
            diagnostics: Vec::new(),
            calculation_error: Some(error.into()),
        }
    }

    /// Dignity tag per point name.
    pub fn dignities(&self) -> BTreeMap<&str, Dignity> {
        self.planets
            .iter()
            .filter_map(|p| p.dignity.map(|d| (p.name.as_str(), d)))
            .collect()
    }
}
