use thiserror::Error;

/// Errors raised at the boundaries of chart calculation.
///
/// The calculations themselves never fail; reports carry a
/// `calculation_error` string instead.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Ephemeris source unavailable: {message}")]
    Unavailable { message: String },
    #[error("Point collection malformed: {message}")]
    MalformedPoints { message: String },
    #[error("Unknown aspect: {name}. Valid aspects: {valid:?}")]
    UnknownAspect { name: String, valid: Vec<String> },
    #[error("Invalid orb {orb} for aspect {name}: must be finite and non-negative")]
    InvalidOrb { name: String, orb: f64 },
    #[error("Failed to read point source {path}: {message}")]
    SourceFailed { path: String, message: String },
}
