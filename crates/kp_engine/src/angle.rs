//! Angle helpers shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // A tiny negative input rounds up to exactly 360.0.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Degrees-minutes-seconds rendering of an angle, rounded to whole arc-seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    /// Convert decimal degrees to D/M/S, carrying rounded seconds into minutes and degrees.
    pub fn from_degrees(value: f64) -> Self {
        let value = value.abs();
        let mut degrees = value.floor() as u32;
        let remainder = (value - degrees as f64) * 60.0;
        let mut minutes = remainder.floor() as u32;
        let mut seconds = ((remainder - minutes as f64) * 60.0).round() as u32;
        if seconds == 60 {
            seconds = 0;
            minutes += 1;
        }
        if minutes == 60 {
            minutes = 0;
            degrees += 1;
        }
        Self {
            degrees: degrees as u16,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    pub fn to_degrees(self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}
