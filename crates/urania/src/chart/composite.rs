//! Composite (midpoint) charts.
//!
//! Only the midpoint positions are derived; composite houses and aspects are
//! not computed.

use crate::chart::info::ChartRef;
use crate::points::{CelestialPoint, PointSet};
use crate::western::normalize_longitude;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Midpoint on the shorter arc between two longitudes, in [0, 360).
///
/// Points exactly opposite each other take the direct average.
pub fn midpoint(lon1: f64, lon2: f64) -> f64 {
    let a = normalize_longitude(lon1);
    let b = normalize_longitude(lon2);
    let mid = (a + b) / 2.0;
    if (a - b).abs() > 180.0 {
        normalize_longitude(mid + 180.0)
    } else {
        mid
    }
}

/// Midpoint points for every name present in both sets.
pub fn composite_points(chart1: &PointSet, chart2: &PointSet) -> PointSet {
    chart1
        .iter()
        .filter_map(|a| {
            let b = chart2.get(&a.name)?;
            let lon = midpoint(a.absolute_longitude, b.absolute_longitude);
            Some(CelestialPoint::from_longitude(a.name.as_str(), lon, false))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeReport {
    pub chart1: ChartRef,
    pub chart2: ChartRef,
    pub composite_planets: PointSet,
    pub calculation_error: Option<String>,
}

impl CompositeReport {
    pub fn calculate(
        chart1: ChartRef,
        planets1: &Value,
        chart2: ChartRef,
        planets2: &Value,
    ) -> Self {
        let sets = PointSet::from_stored(planets1)
            .and_then(|a| PointSet::from_stored(planets2).map(|b| (a, b)));

        match sets {
            Ok((a, b)) => {
                let composite_planets = composite_points(&a, &b);
                log::info!(
                    "Composite of '{}' and '{}': {} shared points",
                    chart1.name,
                    chart2.name,
                    composite_planets.len()
                );
                Self {
                    chart1,
                    chart2,
                    composite_planets,
                    calculation_error: None,
                }
            }
            Err(e) => {
                log::error!("Composite of '{}' and '{}' failed: {}", chart1.name, chart2.name, e);
                Self {
                    chart1,
                    chart2,
                    composite_planets: PointSet::new(),
                    calculation_error: Some(e.to_string()),
                }
            }
        }
    }
}
