//! Krishnamurti Paddhati (KP) chart computation.
//!
//! Birth date, local time and place go in; sidereal positions annotated with sign,
//! nakshatra, pada, sub-lord and house, plus the Vimshottari dasha timeline, come out.
//! Geocoding, timezone lookup and the ephemeris are injected through traits.

pub mod angle;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod location;
pub mod numerology;
pub mod sidereal;
pub mod time;
pub mod vedic;

pub use chart::{assemble_chart, CelestialPoint, Chart, ChartEngine, ChartSettings};
pub use ephemeris::{Ephemeris, FixedEphemeris, HouseCusps, HouseSystem, NodeKind};
#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
pub use error::{ChartError, EphemerisError};
pub use houses::{house_for, HouseCusp};
pub use location::{Gazetteer, GeoLocation, NoTimezones, Place, PlaceResolver, TimezoneResolver};
pub use numerology::Numerology;
pub use sidereal::{to_sidereal, Ayanamsa, CHITRAPAKSHA_AYANAMSA_DEG};
pub use time::{
    parse_birth_date, parse_birth_time, resolve_birth_moment, BirthMoment, EffectiveZone,
};
pub use vedic::{
    decompose, sub_lord, vimshottari_timeline, Body, DashaBounds, DashaLookup, DashaPeriod,
    DashaTimeline, Dignity, Lord, Placement, Point, Sign,
};
