use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct UraniaSettings {
    /// env_logger filter used when RUST_LOG is unset.
    pub log_filter: String,
    /// Aspect name -> orb limit in degrees.
    pub orbs: BTreeMap<String, f64>,
    /// Canonical point names to keep. Empty keeps everything.
    pub include_points: Vec<String>,
}

impl Default for UraniaSettings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            orbs: BTreeMap::new(),
            include_points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingToml {
    #[serde(default = "default_log_filter")]
    filter: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PointsToml {
    #[serde(default)]
    include: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    logging: Option<LoggingToml>,
    #[serde(default)]
    aspects: Option<AspectsToml>,
    #[serde(default)]
    points: Option<PointsToml>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Config text and the path it came from.
///
/// An explicit path must exist. Without one, the common relative locations of
/// `configs/urania.toml` are tried and `None` means none was found.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &DEFAULT_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml {
        logging,
        aspects,
        points,
    } = root;

    let orbs = aspects.unwrap_or_default().orbs;
    for (name, orb) in &orbs {
        if !orb.is_finite() || *orb < 0.0 {
            anyhow::bail!(
                "aspects.orbs.{name} must be a non-negative number of degrees, got {orb}"
            );
        }
    }

    Ok(UraniaSettings {
        log_filter: logging.map(|l| l.filter).unwrap_or_else(default_log_filter),
        orbs,
        include_points: points.unwrap_or_default().include,
    })
}

pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<UraniaSettings> {
    match read_config_text(explicit)? {
        Some((path, text)) => parse_settings(&text)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display())),
        None => Ok(UraniaSettings::default()),
    }
}
