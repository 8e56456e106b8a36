pub mod composite;
pub mod info;
pub mod natal;
pub mod synastry;
pub mod transit;

/// Error string of a report built without upstream positions.
pub const SOURCE_UNAVAILABLE: &str = "Ephemeris source unavailable.";

pub use composite::{composite_points, midpoint, CompositeReport};
pub use info::{BirthData, ChartRef};
pub use natal::{aggregate, NatalChart, NatalSummary};
pub use synastry::{synastry_aspects, SynastryReport};
pub use transit::{transit_aspects, TransitReport};
