//! House cusps and house occupancy.
//!
//! The twelve cusps form a circular sequence; cusp `i` opens house `i + 1` and the next
//! cusp closes it. A house whose cusp is numerically larger than the next one spans the
//! 0°/360° seam.

use serde::Serialize;

use crate::angle::{normalize_degrees, Dms};
use crate::sidereal::{to_sidereal, Ayanamsa};
use crate::vedic::nakshatra::decompose;
use crate::vedic::sublord::sub_lord;
use crate::vedic::types::{Lord, Sign};

pub const HOUSE_COUNT: usize = 12;

/// House number (1..=12) containing `longitude` for the given cusps.
///
/// Falls back to house 1 when no house claims the longitude, which only happens with
/// inconsistent cusps.
pub fn house_for(longitude: f64, cusps: &[f64; HOUSE_COUNT]) -> u8 {
    let d = normalize_degrees(longitude);
    for i in 0..HOUSE_COUNT {
        let current = normalize_degrees(cusps[i]);
        let next = normalize_degrees(cusps[(i + 1) % HOUSE_COUNT]);
        let inside = if current < next {
            current <= d && d < next
        } else {
            d >= current || d < next
        };
        if inside {
            return (i + 1) as u8;
        }
    }
    1
}

/// Convert tropical cusps to sidereal.
pub fn sidereal_cusps(tropical: &[f64; HOUSE_COUNT], ayanamsa: Ayanamsa) -> [f64; HOUSE_COUNT] {
    tropical.map(|cusp| to_sidereal(cusp, ayanamsa))
}

/// A house cusp with its full lordship annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseCusp {
    pub house: u8,
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub dms: String,
    pub sign_lord: Lord,
    pub nakshatra: &'static str,
    pub nakshatra_lord: Lord,
    pub pada: u8,
    pub sub_lord: Lord,
}

impl HouseCusp {
    /// Annotate the sidereal cusp of `house` (1-based).
    pub fn new(house: u8, sidereal_longitude: f64) -> Self {
        let placement = decompose(sidereal_longitude);
        Self {
            house,
            longitude: placement.longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            dms: Dms::from_degrees(placement.degree_in_sign).to_string(),
            sign_lord: placement.sign_lord,
            nakshatra: placement.nakshatra,
            nakshatra_lord: placement.nakshatra_lord,
            pada: placement.pada,
            sub_lord: sub_lord(placement.longitude),
        }
    }
}

/// Annotate all twelve sidereal cusps.
pub fn annotate_cusps(sidereal: &[f64; HOUSE_COUNT]) -> Vec<HouseCusp> {
    sidereal
        .iter()
        .enumerate()
        .map(|(i, &cusp)| HouseCusp::new((i + 1) as u8, cusp))
        .collect()
}
