use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EphemerisError;
use crate::vedic::types::Body;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Tropical house cusps and ascendant for one instant and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Cusps of houses 1..12, in degrees.
    pub cusps: [f64; 12],
    pub ascendant: f64,
}

/// Which lunar node is reported as Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Mean,
    True,
}

/// House system requested from the ephemeris. The engine only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    fn entry(self) -> &'static (&'static str, HouseSystem, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Single-letter code used by the Swiss Ephemeris.
    pub fn code(self) -> u8 {
        self.entry().2
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .map(|(_, system, _)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of tropical positions and house cusps.
///
/// Implementations adapt whatever their backend returns into plain degrees here, so the
/// rest of the engine never inspects raw ephemeris output.
pub trait Ephemeris {
    /// Tropical ecliptic longitude of `body` in [0, 360).
    fn tropical_longitude(&self, julian_day_ut: f64, body: Body) -> Result<f64, EphemerisError>;

    /// Tropical cusps and ascendant for the given place.
    fn house_cusps(
        &self,
        julian_day_ut: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn tropical_longitude(&self, julian_day_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        (**self).tropical_longitude(julian_day_ut, body)
    }

    fn house_cusps(
        &self,
        julian_day_ut: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        (**self).house_cusps(julian_day_ut, location, system)
    }
}
