//! Place and timezone resolution.
//!
//! Geocoding and timezone lookup are external concerns; the engine only sees these two
//! traits. [`Gazetteer`] is a configured, offline implementation of both.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

pub use crate::ephemeris::types::GeoLocation;

/// Turns free-form place text into coordinates.
pub trait PlaceResolver {
    fn resolve_place(&self, text: &str) -> Result<GeoLocation, ChartError>;
}

/// Finds the timezone identifier in force at a location, if known.
pub trait TimezoneResolver {
    fn resolve_timezone(&self, lat: f64, lon: f64) -> Option<String>;
}

/// Resolver that never knows a timezone; every birth time is read as UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTimezones;

impl TimezoneResolver for NoTimezones {
    fn resolve_timezone(&self, _lat: f64, _lon: f64) -> Option<String> {
        None
    }
}

/// A place known to the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name or a raw offset such as `+05:30`.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Place {
    fn matches(&self, wanted: &str) -> bool {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|name| normalize_name(name) == wanted)
    }

    fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// A configured place may lend its zone to coordinates within this many degrees.
pub const ZONE_MATCH_RADIUS_DEG: f64 = 0.5;

/// Offline place list, usually loaded from the `[[places]]` config table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gazetteer {
    places: Vec<Place>,
}

fn normalize_name(name: &str) -> String {
    name.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse `"lat,lon"` (or whitespace separated) decimal coordinates.
pub fn parse_coordinates(text: &str) -> Option<GeoLocation> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let lat: f64 = parts.next()?.parse().ok()?;
    let lon: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some(GeoLocation { lat, lon })
}

impl Gazetteer {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn find(&self, text: &str) -> Option<&Place> {
        let wanted = normalize_name(text);
        self.places.iter().find(|place| place.matches(&wanted))
    }

    fn nearest_with_zone(&self, lat: f64, lon: f64) -> Option<&Place> {
        self.places
            .iter()
            .filter(|place| place.timezone.is_some())
            .map(|place| {
                let dlat = place.latitude - lat;
                let dlon = (place.longitude - lon).abs();
                let dlon = dlon.min(360.0 - dlon);
                (place, (dlat * dlat + dlon * dlon).sqrt())
            })
            .filter(|(_, distance)| *distance <= ZONE_MATCH_RADIUS_DEG)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(place, _)| place)
    }
}

impl PlaceResolver for Gazetteer {
    fn resolve_place(&self, text: &str) -> Result<GeoLocation, ChartError> {
        if let Some(place) = self.find(text) {
            log::debug!("place '{}' resolved to {}", text, place.name);
            return Ok(place.location());
        }
        if let Some(location) = parse_coordinates(text) {
            return Ok(location);
        }
        Err(ChartError::LocationNotFound(text.trim().to_string()))
    }
}

impl TimezoneResolver for Gazetteer {
    fn resolve_timezone(&self, lat: f64, lon: f64) -> Option<String> {
        self.nearest_with_zone(lat, lon)
            .and_then(|place| place.timezone.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gazetteer() -> Gazetteer {
        Gazetteer::new(vec![
            Place {
                name: "Bhubaneswar".to_string(),
                aliases: vec!["Bhubaneswar, Odisha".to_string()],
                latitude: 20.2602964,
                longitude: 85.8394521,
                timezone: Some("Asia/Kolkata".to_string()),
            },
            Place {
                name: "Columbia SC".to_string(),
                aliases: vec![],
                latitude: 34.0007,
                longitude: -81.0348,
                timezone: None,
            },
        ])
    }

    #[test]
    fn test_resolves_name_and_alias() {
        let g = gazetteer();
        assert_eq!(g.resolve_place("bhubaneswar").map(|l| l.lat), Ok(20.2602964));
        assert!(g.resolve_place("  Bhubaneswar,  odisha ").is_ok());
    }

    #[test]
    fn test_accepts_literal_coordinates() {
        let g = gazetteer();
        let loc = g.resolve_place("51.48, 0.0").expect("coordinates");
        assert_eq!(loc, GeoLocation { lat: 51.48, lon: 0.0 });
        assert_eq!(parse_coordinates("91.0, 0.0"), None);
    }

    #[test]
    fn test_unknown_place_is_location_not_found() {
        let g = gazetteer();
        assert_eq!(
            g.resolve_place("Atlantis"),
            Err(ChartError::LocationNotFound("Atlantis".to_string()))
        );
    }

    #[test]
    fn test_timezone_of_nearby_place() {
        let g = gazetteer();
        assert_eq!(g.resolve_timezone(20.3, 85.8), Some("Asia/Kolkata".to_string()));
        assert_eq!(g.resolve_timezone(34.0, -81.0), None);
        assert_eq!(g.resolve_timezone(0.0, 0.0), None);
    }
}
