use kp_engine::{ChartSettings, Gazetteer};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no config path is given (repo root, then from a crate dir).
pub const CONFIG_PATHS: [&str; 2] = ["configs/kp.toml", "../../configs/kp.toml"];

/// Resolved configuration for the chart engine and its collaborators.
#[derive(Debug, Clone, Default)]
pub struct KpConfig {
    pub chart: ChartSettings,
    /// Swiss Ephemeris data directory. `None` defers to `SWISS_EPHEMERIS_PATH`.
    pub ephemeris_path: Option<PathBuf>,
    pub places: Gazetteer,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartSettings,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    places: Gazetteer,
}

/// Read `kp.toml` from `path`, or from the first of [`CONFIG_PATHS`] that exists.
pub fn read_config_text(path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()));
    }
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load kp.toml from {:?}", CONFIG_PATHS);
}

fn validate_places(places: &Gazetteer) -> anyhow::Result<()> {
    for place in places.places() {
        if place.name.trim().is_empty() {
            anyhow::bail!("places entry with empty name");
        }
        if !(-90.0..=90.0).contains(&place.latitude) {
            anyhow::bail!("places.{}: latitude out of range: {}", place.name, place.latitude);
        }
        if !(-180.0..=180.0).contains(&place.longitude) {
            anyhow::bail!("places.{}: longitude out of range: {}", place.name, place.longitude);
        }
    }
    Ok(())
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> anyhow::Result<KpConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kp.toml: {e}"))?;
    let RootConfigToml {
        chart,
        ephemeris,
        places,
    } = root;
    chart
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] config in kp.toml: {e}"))?;
    validate_places(&places)?;
    Ok(KpConfig {
        chart,
        ephemeris_path: ephemeris.path,
        places,
    })
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<KpConfig> {
    let text = read_config_text(path)?;
    parse_config(&text)
}
