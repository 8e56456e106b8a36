use crate::aspects::{AspectClassifier, TransitAspect};
use crate::chart::SOURCE_UNAVAILABLE;
use crate::points::{normalize_points, PointSet, RawChart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NATAL_MALFORMED: &str = "Natal planets data malformed.";

/// Cross aspects from transiting points (first) to natal points (second),
/// tightest orb first.
pub fn transit_aspects(
    transiting: &PointSet,
    natal: &PointSet,
    classifier: &AspectClassifier,
) -> Vec<TransitAspect> {
    classifier
        .cross_aspects(transiting, natal)
        .into_iter()
        .map(TransitAspect::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub transit_datetime: DateTime<Utc>,
    pub transiting_planets: PointSet,
    pub aspects_to_natal: Vec<TransitAspect>,
    pub calculation_error: Option<String>,
}

impl TransitReport {
    /// Transits at `transit_datetime` to a stored natal planet map.
    ///
    /// A malformed natal collection still returns the transiting planets,
    /// with no aspects and an error string. Missing upstream data returns an
    /// empty, error-tagged report.
    pub fn calculate(
        natal_planets: &Value,
        transiting: Option<&RawChart>,
        transit_datetime: DateTime<Utc>,
        classifier: &AspectClassifier,
    ) -> Self {
        let Some(transiting) = transiting else {
            log::warn!("No transiting positions for {}", transit_datetime);
            return Self::failed(transit_datetime, PointSet::new(), SOURCE_UNAVAILABLE);
        };

        log::info!("Calculating transits for date: {}", transit_datetime);
        let transiting_planets = normalize_points(&transiting.points).points;

        let natal = match PointSet::from_stored(natal_planets) {
            Ok(natal) => natal,
            Err(e) => {
                log::error!("{}", e);
                return Self::failed(transit_datetime, transiting_planets, NATAL_MALFORMED);
            }
        };

        let aspects_to_natal = transit_aspects(&transiting_planets, &natal, classifier);
        log::info!(
            "Calculated {} aspects between transiting and natal planets.",
            aspects_to_natal.len()
        );

        Self {
            transit_datetime,
            transiting_planets,
            aspects_to_natal,
            calculation_error: None,
        }
    }

    fn failed(transit_datetime: DateTime<Utc>, transiting_planets: PointSet, error: &str) -> Self {
        Self {
            transit_datetime,
            transiting_planets,
            aspects_to_natal: Vec::new(),
            calculation_error: Some(error.to_string()),
        }
    }
}
