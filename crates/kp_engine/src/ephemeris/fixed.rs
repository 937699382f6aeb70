//! Ephemeris backed by positions supplied up front.
//!
//! Useful for charts whose positions were computed elsewhere, and for tests. The instant
//! passed to the queries is ignored.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{Ephemeris, GeoLocation, HouseCusps, HouseSystem};
use crate::error::EphemerisError;
use crate::vedic::types::Body;

/// Tropical longitudes per body. A missing body fails when queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct BodyLongitudes {
    pub sun: Option<f64>,
    pub moon: Option<f64>,
    pub mars: Option<f64>,
    pub mercury: Option<f64>,
    pub jupiter: Option<f64>,
    pub venus: Option<f64>,
    pub saturn: Option<f64>,
    pub rahu: Option<f64>,
}

impl BodyLongitudes {
    pub fn get(&self, body: Body) -> Option<f64> {
        match body {
            Body::Sun => self.sun,
            Body::Moon => self.moon,
            Body::Mars => self.mars,
            Body::Mercury => self.mercury,
            Body::Jupiter => self.jupiter,
            Body::Venus => self.venus,
            Body::Saturn => self.saturn,
            Body::Rahu => self.rahu,
        }
    }

    pub fn set(&mut self, body: Body, longitude: f64) {
        let slot = match body {
            Body::Sun => &mut self.sun,
            Body::Moon => &mut self.moon,
            Body::Mars => &mut self.mars,
            Body::Mercury => &mut self.mercury,
            Body::Jupiter => &mut self.jupiter,
            Body::Venus => &mut self.venus,
            Body::Saturn => &mut self.saturn,
            Body::Rahu => &mut self.rahu,
        };
        *slot = Some(longitude);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedEphemeris {
    #[serde(default)]
    pub bodies: BodyLongitudes,
    #[serde(default)]
    pub houses: Option<HouseCusps>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Body, longitude: f64) -> Self {
        self.bodies.set(body, longitude);
        self
    }

    pub fn with_houses(mut self, cusps: [f64; 12], ascendant: f64) -> Self {
        self.houses = Some(HouseCusps { cusps, ascendant });
        self
    }

    /// Parse the JSON fixture format:
    /// `{"bodies": {"sun": 12.5, ...}, "houses": {"cusps": [..12..], "ascendant": 1.0}}`.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Ephemeris for FixedEphemeris {
    fn tropical_longitude(&self, julian_day_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        self.bodies
            .get(body)
            .filter(|lon| lon.is_finite())
            .map(|lon| lon.rem_euclid(360.0))
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day: julian_day_ut,
                message: "no position supplied".to_string(),
            })
    }

    fn house_cusps(
        &self,
        _julian_day_ut: f64,
        _location: GeoLocation,
        _system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        self.houses.ok_or_else(|| EphemerisError::HouseCalculationFailed {
            message: "no house cusps supplied".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_fails() {
        let eph = FixedEphemeris::new().with_body(Body::Sun, 10.0);
        assert_eq!(eph.tropical_longitude(2451545.0, Body::Sun), Ok(10.0));
        assert!(matches!(
            eph.tropical_longitude(2451545.0, Body::Moon),
            Err(EphemerisError::CalculationFailed { .. })
        ));
    }

    #[test]
    fn test_parse_json_fixture() {
        let text = r#"{
            "bodies": {"sun": 370.0, "rahu": 100.0},
            "houses": {"cusps": [0,30,60,90,120,150,180,210,240,270,300,330], "ascendant": 0.0}
        }"#;
        let eph = FixedEphemeris::from_json_str(text).expect("valid fixture");
        assert_eq!(eph.tropical_longitude(0.0, Body::Sun), Ok(10.0));
        assert_eq!(eph.tropical_longitude(0.0, Body::Rahu), Ok(100.0));
        let houses = eph
            .house_cusps(0.0, GeoLocation { lat: 0.0, lon: 0.0 }, HouseSystem::Placidus)
            .expect("houses supplied");
        assert_eq!(houses.cusps[3], 90.0);
    }
}
