//! Vimshottari dasha timeline.
//!
//! Dashas are time periods ruled by planets, calculated based on the Moon's nakshatra.
//! The first period is the balance of the Moon's nakshatra lord remaining at birth; every
//! later period runs its full allotment in the fixed cyclic order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::vedic::nakshatra::{nakshatra_position, NAKSHATRA_WIDTH};
use crate::vedic::types::{Lord, VIMSHOTTARI, VIMSHOTTARI_TOTAL_YEARS};

pub const DASHA_YEAR_DAYS: f64 = 365.25;

/// Upper limit accepted for `DashaBounds::horizon_years`.
pub const MAX_DASHA_HORIZON_YEARS: f64 = 1_000.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Span of `years` dasha years, or `None` when it does not fit a `Duration`.
fn dasha_span(years: f64) -> Option<Duration> {
    let millis = (years * DASHA_YEAR_DAYS * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

/// Termination bound for timeline generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaBounds {
    /// Generation stops after the first period ending beyond this many years from birth.
    pub horizon_years: f64,
    /// Hard cap on the number of generated periods.
    pub max_periods: usize,
}

pub const DEFAULT_DASHA_BOUNDS: DashaBounds = DashaBounds {
    horizon_years: 210.0,
    max_periods: 30,
};

impl Default for DashaBounds {
    fn default() -> Self {
        DEFAULT_DASHA_BOUNDS
    }
}

impl DashaBounds {
    /// Bounds must let the timeline cover one full 120-year cycle. The first period may be
    /// arbitrarily short, so ten periods are needed for nine full allotments.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !(VIMSHOTTARI_TOTAL_YEARS..=MAX_DASHA_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(ChartError::InvalidSettings(format!(
                "dasha horizon_years must be within {VIMSHOTTARI_TOTAL_YEARS}..={MAX_DASHA_HORIZON_YEARS}, got {}",
                self.horizon_years
            )));
        }
        if self.max_periods < VIMSHOTTARI.len() + 1 {
            return Err(ChartError::InvalidSettings(format!(
                "dasha max_periods must be at least {}, got {}",
                VIMSHOTTARI.len() + 1,
                self.max_periods
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Lord,
    pub start: DateTime<Utc>,
    /// Nominal length in years.
    pub years: f64,
    pub end: DateTime<Utc>,
}

impl DashaPeriod {
    /// `None` when the end instant falls outside the representable calendar.
    fn starting_at(lord: Lord, start: DateTime<Utc>, years: f64) -> Option<Self> {
        let end = start.checked_add_signed(dasha_span(years)?)?;
        Some(Self {
            lord,
            start,
            years,
            end,
        })
    }

    /// Inclusive at both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// The periods active at a query instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashaLookup {
    pub current: Option<DashaPeriod>,
    pub upcoming: Option<DashaPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    #[serde(rename = "birthDateTime")]
    pub birth: DateTime<Utc>,
    pub periods: Vec<DashaPeriod>,
}

impl DashaTimeline {
    /// The partial first period left at birth.
    pub fn balance_at_birth(&self) -> Option<&DashaPeriod> {
        self.periods.first()
    }

    /// Current and upcoming periods at `at`.
    ///
    /// After the last period ends, the last period stays current with nothing upcoming.
    /// Before the first one starts, nothing is current and the first period is upcoming.
    pub fn lookup(&self, at: DateTime<Utc>) -> DashaLookup {
        if let Some(idx) = self.periods.iter().position(|p| p.contains(at)) {
            return DashaLookup {
                current: Some(self.periods[idx].clone()),
                upcoming: self.periods.get(idx + 1).cloned(),
            };
        }
        match self.periods.last() {
            Some(last) if at > last.end => DashaLookup {
                current: Some(last.clone()),
                upcoming: None,
            },
            _ => DashaLookup {
                current: None,
                upcoming: self.periods.first().cloned(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Compute Vimshottari dasha periods from the Moon's sidereal longitude.
pub fn vimshottari_timeline(
    moon_longitude: f64,
    birth: DateTime<Utc>,
    bounds: DashaBounds,
) -> DashaTimeline {
    let (nakshatra_index, offset) = nakshatra_position(moon_longitude);
    // Nakshatra lords repeat the Vimshottari order, so index mod 9 is the lord's position.
    let first_lord = VIMSHOTTARI[nakshatra_index % VIMSHOTTARI.len()].0;
    let elapsed = (offset / NAKSHATRA_WIDTH).clamp(0.0, 1.0);

    // An unrepresentable horizon leaves only the period cap and the calendar limit.
    let horizon_end =
        dasha_span(bounds.horizon_years).and_then(|span| birth.checked_add_signed(span));

    let mut periods = Vec::with_capacity(bounds.max_periods.min(64));
    let mut start = birth;
    for step in 0..bounds.max_periods.max(1) {
        let lord = first_lord.nth_after(step);
        let years = if step == 0 {
            lord.years() * (1.0 - elapsed)
        } else {
            lord.years()
        };
        let Some(period) = DashaPeriod::starting_at(lord, start, years) else {
            log::warn!(
                "dasha timeline stopped at the calendar limit after {} periods",
                periods.len()
            );
            break;
        };
        start = period.end;
        let past_horizon = horizon_end.map_or(false, |end| period.end > end);
        periods.push(period);
        if past_horizon {
            break;
        }
    }

    log::debug!(
        "vimshottari: moon {:.4}° in nakshatra {}, {} periods from {}",
        moon_longitude,
        nakshatra_index,
        periods.len(),
        birth
    );

    DashaTimeline { birth, periods }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2010, 4, 2, 2, 3, 0).single().expect("valid datetime")
    }

    #[test]
    fn test_first_period_is_moon_nakshatra_lord() {
        // 13.33° is the last sliver of Ashwini, ruled by Ketu.
        let timeline = vimshottari_timeline(13.33, birth(), DashaBounds::default());
        assert_eq!(timeline.periods[0].lord, Lord::Ketu);
        assert_eq!(timeline.periods[1].lord, Lord::Venus);
        assert!(timeline.periods[0].years < 0.01);
    }

    #[test]
    fn test_half_elapsed_nakshatra() {
        let timeline = vimshottari_timeline(NAKSHATRA_WIDTH * 3.5, birth(), DashaBounds::default());
        assert_eq!(timeline.periods[0].lord, Lord::Moon);
        assert!((timeline.periods[0].years - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_generation_is_bounded() {
        let bounds = DashaBounds::default();
        let timeline = vimshottari_timeline(200.0, birth(), bounds);
        assert!(timeline.len() <= bounds.max_periods);
        let last = timeline.periods.last().expect("non-empty");
        let span_days = (last.end - birth()).num_days() as f64;
        assert!(span_days > bounds.horizon_years * DASHA_YEAR_DAYS);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(DashaBounds::default().validate().is_ok());
        let short = DashaBounds { horizon_years: 100.0, max_periods: 30 };
        assert!(short.validate().is_err());
        let few = DashaBounds { horizon_years: 210.0, max_periods: 9 };
        assert!(few.validate().is_err());
        let nan = DashaBounds { horizon_years: f64::NAN, max_periods: 30 };
        assert!(nan.validate().is_err());
        let inf = DashaBounds { horizon_years: f64::INFINITY, max_periods: 30 };
        assert!(inf.validate().is_err());
        let huge = DashaBounds { horizon_years: 300_000.0, max_periods: 30 };
        assert!(huge.validate().is_err());
        let cap = DashaBounds { horizon_years: MAX_DASHA_HORIZON_YEARS, max_periods: 30 };
        assert!(cap.validate().is_ok());
    }

    #[test]
    fn test_span_rejects_unrepresentable_lengths() {
        assert!(dasha_span(f64::INFINITY).is_none());
        assert!(dasha_span(f64::NAN).is_none());
        assert!(dasha_span(1e15).is_none());
        assert_eq!(dasha_span(1.0), Some(Duration::milliseconds(31_557_600_000)));
    }
}
