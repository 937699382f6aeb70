//! Swiss Ephemeris backend (cargo feature `swisseph`).

use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex};
use swisseph::{AscMc, Cusp};

use crate::angle::normalize_degrees;
use crate::ephemeris::types::{Ephemeris, GeoLocation, HouseCusps, HouseSystem, NodeKind};
use crate::error::EphemerisError;
use crate::vedic::types::Body;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH: read the Swiss Ephemeris data files.
const FLG_SWIEPH: i32 = 2;

const MEAN_NODE: i32 = 10;
const TRUE_NODE: i32 = 11;

fn body_code(body: Body, node: NodeKind) -> i32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Rahu => match node {
            NodeKind::Mean => MEAN_NODE,
            NodeKind::True => TRUE_NODE,
        },
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    node: NodeKind,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path. Falls back to
    /// `SWISS_EPHEMERIS_PATH`, then the system default location.
    pub fn new(ephemeris_path: Option<PathBuf>, node: NodeKind) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        log::info!("Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
            node,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn tropical_longitude(&self, julian_day_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        let code = body_code(body, self.node);
        let result = calc_ut(julian_day_ut, code as u32, FLG_SWIEPH as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day: julian_day_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day: julian_day_ut,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(normalize_degrees(longitude))
    }

    fn house_cusps(
        &self,
        julian_day_ut: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        let (c, a) = houses_ex(
            julian_day_ut,
            FLG_SWIEPH,
            location.lat,
            location.lon,
            system.code() as i32,
        );
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) || !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} cusps undefined at lat {:.4}, lon {:.4}",
                    system, location.lat, location.lon
                ),
            });
        }

        Ok(HouseCusps {
            cusps: values.map(normalize_degrees),
            ascendant: normalize_degrees(ascmc.ascendant),
        })
    }
}
