//! Chart assembly: birth moment and ephemeris in, annotated chart out.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::angle::normalize_degrees;
use crate::chart::data::{CelestialPoint, Chart};
use crate::chart::settings::ChartSettings;
use crate::ephemeris::types::Ephemeris;
use crate::error::{ChartError, EphemerisError};
use crate::houses::{annotate_cusps, sidereal_cusps};
use crate::location::{PlaceResolver, TimezoneResolver};
use crate::sidereal::to_sidereal;
use crate::time::{resolve_birth_moment, BirthMoment};
use crate::vedic::dashas::vimshottari_timeline;
use crate::vedic::types::{Body, Point, QUERIED_BODIES};

/// Assemble a chart for `birth`, looking up the running dasha at `as_of`.
///
/// Every body is queried before anything is annotated; if any query fails the error is
/// returned and no chart is produced.
pub fn assemble_chart<E: Ephemeris + ?Sized>(
    birth: &BirthMoment,
    ephemeris: &E,
    settings: &ChartSettings,
    as_of: DateTime<Utc>,
) -> Result<Chart, ChartError> {
    settings.validate()?;
    let jd = birth.julian_day_ut;
    let ayanamsa = settings.ayanamsa;

    let mut tropical = Vec::with_capacity(QUERIED_BODIES.len());
    for body in QUERIED_BODIES {
        let longitude = ephemeris.tropical_longitude(jd, body).map_err(|e| {
            log::error!("ephemeris failed for {} at JD {:.6}: {}", body, jd, e);
            e
        })?;
        tropical.push((body, normalize_degrees(longitude)));
    }

    let houses = ephemeris
        .house_cusps(jd, birth.location, settings.house_system)
        .map_err(|e| {
            log::error!("house cusps failed at JD {:.6}: {}", jd, e);
            e
        })?;
    let cusps = sidereal_cusps(&houses.cusps, ayanamsa);

    let mut points = Vec::with_capacity(tropical.len() + 2);
    points.push(CelestialPoint::new(
        Point::Ascendant,
        Some(normalize_degrees(houses.ascendant)),
        to_sidereal(houses.ascendant, ayanamsa),
        &cusps,
    ));
    for &(body, longitude) in &tropical {
        points.push(CelestialPoint::new(
            Point::from_body(body),
            Some(longitude),
            to_sidereal(longitude, ayanamsa),
            &cusps,
        ));
    }

    let rahu = points
        .iter()
        .find(|p| p.point == Point::Rahu)
        .map(|p| p.longitude)
        .ok_or_else(|| missing_body(Body::Rahu, jd))?;
    points.push(CelestialPoint::new(
        Point::Ketu,
        None,
        normalize_degrees(rahu + 180.0),
        &cusps,
    ));

    let moon = points
        .iter()
        .find(|p| p.point == Point::Moon)
        .map(|p| p.longitude)
        .ok_or_else(|| missing_body(Body::Moon, jd))?;
    let timeline = vimshottari_timeline(moon, birth.utc, settings.dasha);
    let dasha = timeline.lookup(as_of);

    log::debug!(
        "chart assembled: asc {:.4}, moon {:.4}, {} dasha periods",
        points[0].longitude,
        moon,
        timeline.len()
    );

    Ok(Chart {
        birth: birth.clone(),
        houses: annotate_cusps(&cusps),
        points,
        dasha,
        timeline: timeline.periods,
        ayanamsa_used: ayanamsa.degrees(),
    })
}

fn missing_body(body: Body, jd: f64) -> ChartError {
    ChartError::Ephemeris(EphemerisError::CalculationFailed {
        body: body.name().to_string(),
        julian_day: jd,
        message: "body missing from ephemeris results".to_string(),
    })
}

/// The full pipeline with its collaborators wired in.
pub struct ChartEngine<E, P, T> {
    ephemeris: E,
    places: P,
    zones: T,
    settings: ChartSettings,
}

impl<E, P, T> ChartEngine<E, P, T>
where
    E: Ephemeris,
    P: PlaceResolver,
    T: TimezoneResolver,
{
    pub fn new(
        ephemeris: E,
        places: P,
        zones: T,
        settings: ChartSettings,
    ) -> Result<Self, ChartError> {
        settings.validate()?;
        Ok(Self {
            ephemeris,
            places,
            zones,
            settings,
        })
    }

    /// Resolve place and zone for a local birth time.
    pub fn birth_moment(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        place: &str,
    ) -> Result<BirthMoment, ChartError> {
        resolve_birth_moment(date, time, place, &self.places, &self.zones)
    }

    /// Compute a chart with the dasha lookup taken at the current instant.
    pub fn compute_chart(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        place: &str,
    ) -> Result<Chart, ChartError> {
        self.compute_chart_at(date, time, place, Utc::now())
    }

    pub fn compute_chart_at(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        place: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Chart, ChartError> {
        let birth = self.birth_moment(date, time, place)?;
        assemble_chart(&birth, &self.ephemeris, &self.settings, as_of)
    }
}
