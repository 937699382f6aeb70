use serde::Serialize;

use crate::angle::Dms;
use crate::houses::{house_for, HouseCusp, HOUSE_COUNT};
use crate::time::BirthMoment;
use crate::vedic::dashas::{DashaLookup, DashaPeriod};
use crate::vedic::dignity::{classify, Dignity};
use crate::vedic::nakshatra::decompose;
use crate::vedic::sublord::sub_lord;
use crate::vedic::types::{Lord, Point, Sign};

/// A planet, node or the Ascendant, fully annotated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialPoint {
    pub point: Point,
    /// `None` for Ketu, which is derived rather than queried.
    pub tropical_longitude: Option<f64>,
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub dms: String,
    pub sign_lord: Lord,
    pub nakshatra: &'static str,
    pub nakshatra_lord: Lord,
    pub pada: u8,
    pub sub_lord: Lord,
    pub house: u8,
    pub dignity: Option<Dignity>,
}

impl CelestialPoint {
    /// Annotate a sidereal longitude and place it among the sidereal cusps.
    pub fn new(
        point: Point,
        tropical_longitude: Option<f64>,
        sidereal_longitude: f64,
        cusps: &[f64; HOUSE_COUNT],
    ) -> Self {
        let placement = decompose(sidereal_longitude);
        Self {
            point,
            tropical_longitude,
            longitude: placement.longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            dms: Dms::from_degrees(placement.degree_in_sign).to_string(),
            sign_lord: placement.sign_lord,
            nakshatra: placement.nakshatra,
            nakshatra_lord: placement.nakshatra_lord,
            pada: placement.pada,
            sub_lord: sub_lord(placement.longitude),
            house: house_for(placement.longitude, cusps),
            dignity: classify(point, placement.sign),
        }
    }
}

/// A computed KP chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub birth: BirthMoment,
    pub houses: Vec<HouseCusp>,
    /// Ascendant first, then the planets, then Rahu and Ketu.
    pub points: Vec<CelestialPoint>,
    pub dasha: DashaLookup,
    pub timeline: Vec<DashaPeriod>,
    pub ayanamsa_used: f64,
}

impl Chart {
    pub fn point(&self, point: Point) -> Option<&CelestialPoint> {
        self.points.iter().find(|p| p.point == point)
    }

    /// Points placed in `house` (1-based).
    pub fn occupants(&self, house: u8) -> impl Iterator<Item = &CelestialPoint> + '_ {
        self.points.iter().filter(move |p| p.house == house)
    }
}
