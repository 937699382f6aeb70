//! Ephemeris backend selection for the `chart` command.

use anyhow::Context;
use kp_config::KpConfig;
use kp_engine::{Ephemeris, FixedEphemeris};
use std::fs;
use std::path::Path;

/// Positions file if given, otherwise Swiss Ephemeris when compiled in.
pub fn open(positions: Option<&Path>, config: &KpConfig) -> anyhow::Result<Box<dyn Ephemeris>> {
    if let Some(path) = positions {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read positions file {}", path.display()))?;
        let fixed = FixedEphemeris::from_json_str(&text)
            .with_context(|| format!("Failed to parse positions file {}", path.display()))?;
        log::info!("using fixed positions from {}", path.display());
        return Ok(Box::new(fixed));
    }
    swiss(config)
}

#[cfg(feature = "swisseph")]
fn swiss(config: &KpConfig) -> anyhow::Result<Box<dyn Ephemeris>> {
    let adapter =
        kp_engine::SwissEphemerisAdapter::new(config.ephemeris_path.clone(), config.chart.node)?;
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn swiss(_config: &KpConfig) -> anyhow::Result<Box<dyn Ephemeris>> {
    anyhow::bail!("No ephemeris available: pass --positions <file.json> or build with --features swisseph")
}
