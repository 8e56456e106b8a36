//! Where raw point records come from.
//!
//! The calculators never talk to an ephemeris; they are handed a [`RawChart`]
//! or nothing. A [`PointSource`] is the seam an ephemeris integration plugs
//! into.

use crate::chart::BirthData;
use crate::error::ChartError;
use crate::points::RawChart;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait PointSource: Send + Sync {
    fn name(&self) -> &str;

    async fn compute(&self, subject: &BirthData) -> Result<RawChart, ChartError>;
}

/// Reads precomputed records from a JSON file.
pub struct RawChartFile {
    path: PathBuf,
}

impl RawChartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PointSource for RawChartFile {
    fn name(&self) -> &str {
        "raw_chart_file"
    }

    async fn compute(&self, subject: &BirthData) -> Result<RawChart, ChartError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ChartError::SourceFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        let chart: RawChart = serde_json::from_str(&text).map_err(|e| ChartError::MalformedPoints {
            message: format!("{}: {}", self.path.display(), e),
        })?;
        log::info!(
            "Loaded {} raw points for '{}' from {}",
            chart.points.len(),
            subject.name,
            self.path.display()
        );
        Ok(chart)
    }
}

/// Stands in for a missing ephemeris integration.
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl PointSource for UnavailableSource {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn compute(&self, _subject: &BirthData) -> Result<RawChart, ChartError> {
        Err(ChartError::Unavailable {
            message: self.reason.clone(),
        })
    }
}

/// Run a source, logging and swallowing its failure.
pub async fn fetch_raw_chart(source: &dyn PointSource, subject: &BirthData) -> Option<RawChart> {
    match source.compute(subject).await {
        Ok(chart) => Some(chart),
        Err(e) => {
            log::error!("Point source '{}' failed for '{}': {}", source.name(), subject.name, e);
            None
        }
    }
}
