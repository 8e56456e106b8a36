//! Astrological chart calculation core.
//!
//! Takes point records already computed by an ephemeris library, normalizes
//! them, and derives aspects, transits, synastry, composite midpoints, and
//! natal summaries. Everything here is synchronous and pure except the
//! [`source`] seam.

pub mod aspects;
pub mod chart;
pub mod error;
pub mod points;
pub mod source;
pub mod western;

pub use aspects::{Aspect, AspectClassifier, AspectKind, AspectTable};
pub use chart::{BirthData, ChartRef, CompositeReport, NatalChart, SynastryReport, TransitReport};
pub use error::ChartError;
pub use points::{CelestialPoint, HouseCusp, PointSet, RawChart, RawPoint};
pub use source::{fetch_raw_chart, PointSource, RawChartFile, UnavailableSource};
