//! Tropical to sidereal conversion with a fixed ayanamsa.
//!
//! The ayanamsa is a single configured constant rather than a date-dependent model, so the
//! same tropical longitude always maps to the same sidereal longitude.

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;

/// Chitrapaksha ayanamsa, 24°01'00".
pub const CHITRAPAKSHA_AYANAMSA_DEG: f64 = 24.0166666667;

/// Fixed offset between the tropical and sidereal zodiacs, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ayanamsa(pub f64);

impl Ayanamsa {
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl Default for Ayanamsa {
    fn default() -> Self {
        Ayanamsa(CHITRAPAKSHA_AYANAMSA_DEG)
    }
}

/// Sidereal longitude in [0, 360) for a tropical longitude.
pub fn to_sidereal(tropical: f64, ayanamsa: Ayanamsa) -> f64 {
    normalize_degrees(tropical - ayanamsa.0)
}
