use crate::aspects::types::{Aspect, AspectMatch, AspectTable};
use crate::points::PointSet;

/// Minor-arc separation between two longitudes, in [0, 180] for inputs in [0, 360).
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Classifies pairs of ecliptic longitudes against an aspect table.
#[derive(Debug, Clone, Default)]
pub struct AspectClassifier {
    table: AspectTable,
}

impl AspectClassifier {
    pub fn new(table: AspectTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AspectTable {
        &self.table
    }

    /// Every table entry whose orb window contains the separation.
    ///
    /// Windows are inclusive (`orb <= orb_limit`). A separation inside two
    /// overlapping windows yields both matches, in table order. NaN input
    /// matches nothing.
    pub fn classify(&self, lon1: f64, lon2: f64) -> Vec<AspectMatch> {
        let separation = angular_separation(lon1, lon2);

        self.table
            .entries()
            .iter()
            .filter_map(|entry| {
                let orb = (separation - entry.target_angle).abs();
                (orb <= entry.orb_limit).then_some(AspectMatch {
                    kind: entry.kind,
                    target_angle: entry.target_angle,
                    orb,
                })
            })
            .collect()
    }

    pub fn aspects_between(&self, name1: &str, lon1: f64, name2: &str, lon2: f64) -> Vec<Aspect> {
        self.classify(lon1, lon2)
            .into_iter()
            .map(|found| {
                log::debug!(
                    "Aspect: {} between {} and {} with orb {:.2}",
                    found.kind,
                    name1,
                    name2,
                    found.orb
                );
                Aspect::from_match(name1, name2, found)
            })
            .collect()
    }

    /// Aspects for the full cross product of two sets, tightest orb first.
    ///
    /// Pairs sharing a name are kept: a body aspecting its own position in the
    /// other set is meaningful.
    pub fn cross_aspects(&self, set_a: &PointSet, set_b: &PointSet) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for a in set_a {
            for b in set_b {
                aspects.extend(self.aspects_between(
                    &a.name,
                    a.absolute_longitude,
                    &b.name,
                    b.absolute_longitude,
                ));
            }
        }
        sort_by_orb(&mut aspects);
        aspects
    }

    /// Aspects between every unordered pair of distinct points in one set,
    /// tightest orb first.
    pub fn intra_aspects(&self, set: &PointSet) -> Vec<Aspect> {
        let points: Vec<_> = set.iter().collect();
        let mut aspects = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                aspects.extend(self.aspects_between(
                    &points[i].name,
                    points[i].absolute_longitude,
                    &points[j].name,
                    points[j].absolute_longitude,
                ));
            }
        }
        sort_by_orb(&mut aspects);
        aspects
    }
}

/// Stable ascending sort by orb.
pub fn sort_by_orb(aspects: &mut [Aspect]) {
    aspects.sort_by(|a, b| a.orb.total_cmp(&b.orb));
}
