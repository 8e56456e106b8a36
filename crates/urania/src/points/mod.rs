pub mod normalizer;
pub mod types;

pub use normalizer::{
    canonical_name, normalize_chart, normalize_houses, normalize_point, normalize_points,
    NormalizedChart, NormalizedPoints,
};
pub use types::{CelestialPoint, HouseCusp, PointSet, RawChart, RawPoint};
