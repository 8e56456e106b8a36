use crate::aspects::{AspectClassifier, SynastryAspect};
use crate::chart::info::ChartRef;
use crate::points::PointSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cross aspects between two natal charts, tightest orb first.
pub fn synastry_aspects(
    chart1: &PointSet,
    chart2: &PointSet,
    classifier: &AspectClassifier,
) -> Vec<SynastryAspect> {
    classifier
        .cross_aspects(chart1, chart2)
        .into_iter()
        .map(SynastryAspect::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryReport {
    pub chart1: ChartRef,
    pub chart2: ChartRef,
    pub aspects: Vec<SynastryAspect>,
    pub calculation_error: Option<String>,
}

impl SynastryReport {
    /// Synastry between two stored planet maps.
    pub fn calculate(
        chart1: ChartRef,
        planets1: &Value,
        chart2: ChartRef,
        planets2: &Value,
        classifier: &AspectClassifier,
    ) -> Self {
        let sets = PointSet::from_stored(planets1)
            .and_then(|a| PointSet::from_stored(planets2).map(|b| (a, b)));

        match sets {
            Ok((a, b)) => {
                let aspects = synastry_aspects(&a, &b, classifier);
                log::info!(
                    "Calculated {} synastry aspects between '{}' and '{}'",
                    aspects.len(),
                    chart1.name,
                    chart2.name
                );
                Self {
                    chart1,
                    chart2,
                    aspects,
                    calculation_error: None,
                }
            }
            Err(e) => {
                log::error!(
                    "Synastry between '{}' and '{}' failed: {}",
                    chart1.name,
                    chart2.name,
                    e
                );
                Self {
                    chart1,
                    chart2,
                    aspects: Vec::new(),
                    calculation_error: Some(e.to_string()),
                }
            }
        }
    }
}
