//! Birth time resolution: local wall-clock time at a place to Julian Day (UT).

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;
use crate::location::{GeoLocation, PlaceResolver, TimezoneResolver};

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const MIN_SUPPORTED_YEAR: i32 = -3000;
pub const MAX_SUPPORTED_YEAR: i32 = 3000;

/// The zone interpretation actually applied to the local birth time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum EffectiveZone {
    Named { name: String },
    FixedOffset { seconds: i32 },
    /// No usable zone was found; the local time was taken as UTC.
    UtcFallback,
}

impl EffectiveZone {
    pub fn is_fallback(&self) -> bool {
        matches!(self, EffectiveZone::UtcFallback)
    }
}

impl fmt::Display for EffectiveZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveZone::Named { name } => f.write_str(name),
            EffectiveZone::FixedOffset { seconds } => {
                let sign = if *seconds < 0 { '-' } else { '+' };
                let abs = seconds.abs();
                write!(f, "UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
            EffectiveZone::UtcFallback => f.write_str("UTC (fallback)"),
        }
    }
}

/// Parse `+05:30`, `-0400`, `+5`, optionally prefixed by `UTC` or `GMT`.
fn parse_offset_seconds(text: &str) -> Option<i32> {
    let upper = text.trim().to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper)
        .trim();
    let (sign, digits) = match rest.chars().next()? {
        '+' => (1, &rest[1..]),
        '-' => (-1, &rest[1..]),
        _ => return None,
    };
    if !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if digits.len() == 4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        None => (digits.parse().ok()?, 0),
    };
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Interpret a resolved zone identifier. Unknown or missing identifiers degrade to
/// [`EffectiveZone::UtcFallback`].
pub fn resolve_zone(identifier: Option<&str>) -> EffectiveZone {
    let Some(identifier) = identifier.map(str::trim).filter(|s| !s.is_empty()) else {
        log::warn!("no timezone resolved; reading birth time as UTC");
        return EffectiveZone::UtcFallback;
    };
    if identifier.parse::<Tz>().is_ok() {
        return EffectiveZone::Named {
            name: identifier.to_string(),
        };
    }
    if let Some(seconds) = parse_offset_seconds(identifier) {
        return EffectiveZone::FixedOffset { seconds };
    }
    log::warn!("unrecognized timezone '{}'; reading birth time as UTC", identifier);
    EffectiveZone::UtcFallback
}

fn from_local<T: TimeZone>(zone: &T, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // Repeated hour: take the second (standard time) occurrence.
        LocalResult::Ambiguous(_, later) => Some(later.with_timezone(&Utc)),
        // Skipped hour: apply the offset in force before the transition.
        LocalResult::None => {
            let before = local.checked_sub_signed(Duration::days(1))?;
            let offset = zone.offset_from_utc_datetime(&before).fix();
            let utc = local.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}

/// Convert a local date and time in `zone` to UTC.
pub fn localize(
    date: NaiveDate,
    time: NaiveTime,
    zone: &EffectiveZone,
) -> Result<DateTime<Utc>, ChartError> {
    let local = date.and_time(time);
    let utc = match zone {
        EffectiveZone::Named { name } => {
            let tz: Tz = name
                .parse()
                .map_err(|e| ChartError::InvalidBirthMoment(format!("timezone {name}: {e}")))?;
            from_local(&tz, local)
        }
        EffectiveZone::FixedOffset { seconds } => {
            let offset = FixedOffset::east_opt(*seconds).ok_or_else(|| {
                ChartError::InvalidBirthMoment(format!("UTC offset out of range: {seconds}s"))
            })?;
            from_local(&offset, local)
        }
        EffectiveZone::UtcFallback => Some(Utc.from_utc_datetime(&local)),
    };
    utc.ok_or_else(|| ChartError::InvalidBirthMoment(format!("cannot convert {local} to UTC")))
}

/// Julian Day (UT) of an instant, keeping sub-second precision.
pub fn julian_day_ut(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + seconds / 86_400.0
}

/// A fully resolved birth moment. Built once per chart and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: GeoLocation,
    pub zone: EffectiveZone,
    pub utc: DateTime<Utc>,
    pub julian_day_ut: f64,
}

impl BirthMoment {
    /// Build from already-resolved coordinates and zone.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        location: GeoLocation,
        zone: EffectiveZone,
    ) -> Result<Self, ChartError> {
        if !(MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year()) {
            return Err(ChartError::InvalidBirthMoment(format!(
                "year {} outside supported range {MIN_SUPPORTED_YEAR}..={MAX_SUPPORTED_YEAR}",
                date.year()
            )));
        }
        let utc = localize(date, time, &zone)?;
        Ok(Self {
            date,
            time,
            location,
            zone,
            utc,
            julian_day_ut: julian_day_ut(utc),
        })
    }
}

/// Resolve place text and local time into a [`BirthMoment`].
///
/// Fails with `LocationNotFound` when the place cannot be geocoded. A missing timezone is
/// not an error: the local time is read as UTC and the returned zone records the fallback.
pub fn resolve_birth_moment(
    date: NaiveDate,
    time: NaiveTime,
    place: &str,
    places: &dyn PlaceResolver,
    zones: &dyn TimezoneResolver,
) -> Result<BirthMoment, ChartError> {
    let location = places.resolve_place(place)?;
    let identifier = zones.resolve_timezone(location.lat, location.lon);
    let zone = resolve_zone(identifier.as_deref());
    let moment = BirthMoment::new(date, time, location, zone)?;
    log::info!(
        "birth moment {} {} at {} ({:.4}, {:.4}) -> {} JD {:.6}",
        date,
        time,
        moment.zone,
        location.lat,
        location.lon,
        moment.utc,
        moment.julian_day_ut
    );
    Ok(moment)
}

/// Parse `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_birth_date(text: &str) -> Result<NaiveDate, ChartError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .map_err(|_| {
            ChartError::InvalidBirthMoment(format!(
                "invalid date '{text}' (expected YYYY-MM-DD or DD/MM/YYYY)"
            ))
        })
}

/// Parse `HH:MM`, `HH:MM:SS`, or a 12-hour time such as `7:33 AM`.
pub fn parse_birth_time(text: &str) -> Result<NaiveTime, ChartError> {
    let text = text.trim();
    let upper = text.to_ascii_uppercase();
    ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p", "%I:%M%p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&upper, format).ok())
        .ok_or_else(|| {
            ChartError::InvalidBirthMoment(format!(
                "invalid time '{text}' (expected HH:MM[:SS] or h:MM AM/PM)"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_of_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).single().expect("valid");
        assert!((julian_day_ut(j2000) - 2451545.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_offset_seconds("+05:30"), Some(19_800));
        assert_eq!(parse_offset_seconds("UTC-4"), Some(-14_400));
        assert_eq!(parse_offset_seconds("-0330"), Some(-12_600));
        assert_eq!(parse_offset_seconds("GMT+5:45"), Some(20_700));
        assert_eq!(parse_offset_seconds("Asia/Kolkata"), None);
        assert_eq!(parse_offset_seconds("+25:00"), None);
    }

    #[test]
    fn test_malformed_offsets_are_rejected() {
        assert_eq!(parse_offset_seconds("+1é1"), None);
        assert_eq!(parse_offset_seconds("-ab:cd"), None);
        assert_eq!(parse_offset_seconds("+"), None);
        assert_eq!(parse_offset_seconds("UTC"), None);
        assert_eq!(resolve_zone(Some("+1é1")), EffectiveZone::UtcFallback);
        assert_eq!(resolve_zone(Some("GMT+０５００")), EffectiveZone::UtcFallback);
    }

    #[test]
    fn test_resolve_zone_kinds() {
        assert_eq!(
            resolve_zone(Some("Asia/Kolkata")),
            EffectiveZone::Named { name: "Asia/Kolkata".to_string() }
        );
        assert_eq!(
            resolve_zone(Some("+05:30")),
            EffectiveZone::FixedOffset { seconds: 19_800 }
        );
        assert_eq!(resolve_zone(Some("Mars/Olympus")), EffectiveZone::UtcFallback);
        assert_eq!(resolve_zone(None), EffectiveZone::UtcFallback);
    }

    #[test]
    fn test_parse_birth_time_formats() {
        let expected = NaiveTime::from_hms_opt(7, 33, 0).expect("valid");
        assert_eq!(parse_birth_time("07:33"), Ok(expected));
        assert_eq!(parse_birth_time("7:33 am"), Ok(expected));
        assert_eq!(parse_birth_time("07:33:00"), Ok(expected));
        assert_eq!(
            parse_birth_time("12:05 AM"),
            Ok(NaiveTime::from_hms_opt(0, 5, 0).expect("valid"))
        );
        assert!(parse_birth_time("25:00").is_err());
    }

    #[test]
    fn test_parse_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2010, 4, 2).expect("valid");
        assert_eq!(parse_birth_date("2010-04-02"), Ok(expected));
        assert_eq!(parse_birth_date("02/04/2010"), Ok(expected));
        assert!(parse_birth_date("2010/31/31").is_err());
    }
}
