//! Zodiacal decomposition: sign, nakshatra and pada for a sidereal longitude.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::Serialize;

use crate::angle::normalize_degrees;
use crate::vedic::types::{Lord, Sign, SIGN_WIDTH};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_WIDTH: f64 = 360.0 / 27.0;
pub const PADA_WIDTH: f64 = NAKSHATRA_WIDTH / 4.0;

/// A longitude closer than this to the end of its segment is treated as lying on the
/// boundary and belongs to the next segment. About 0.0036 arc-seconds.
pub const BOUNDARY_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nakshatra {
    pub name: &'static str,
    pub lord: Lord,
}

const fn nak(name: &'static str, lord: Lord) -> Nakshatra {
    Nakshatra { name, lord }
}

/// The 27 nakshatras from 0° sidereal. Lords repeat the Vimshottari order three times.
pub const NAKSHATRAS: [Nakshatra; NAKSHATRA_COUNT] = [
    nak("Ashwini", Lord::Ketu),
    nak("Bharani", Lord::Venus),
    nak("Krittika", Lord::Sun),
    nak("Rohini", Lord::Moon),
    nak("Mrigashira", Lord::Mars),
    nak("Ardra", Lord::Rahu),
    nak("Punarvasu", Lord::Jupiter),
    nak("Pushya", Lord::Saturn),
    nak("Ashlesha", Lord::Mercury),
    nak("Magha", Lord::Ketu),
    nak("Purva Phalguni", Lord::Venus),
    nak("Uttara Phalguni", Lord::Sun),
    nak("Hasta", Lord::Moon),
    nak("Chitra", Lord::Mars),
    nak("Swati", Lord::Rahu),
    nak("Vishakha", Lord::Jupiter),
    nak("Anuradha", Lord::Saturn),
    nak("Jyeshtha", Lord::Mercury),
    nak("Mula", Lord::Ketu),
    nak("Purva Ashadha", Lord::Venus),
    nak("Uttara Ashadha", Lord::Sun),
    nak("Shravana", Lord::Moon),
    nak("Dhanishta", Lord::Mars),
    nak("Shatabhisha", Lord::Rahu),
    nak("Purva Bhadrapada", Lord::Jupiter),
    nak("Uttara Bhadrapada", Lord::Saturn),
    nak("Revati", Lord::Mercury),
];

/// Split a longitude in [0, 360) into (segment index, offset within segment) for `count`
/// equal segments of `width` degrees.
///
/// The index is clamped to `0..count`. An offset within [`BOUNDARY_EPSILON`] of `width`
/// moves the longitude onto the start of the next segment; the last segment keeps it.
pub fn segment(longitude: f64, width: f64, count: usize) -> (usize, f64) {
    let raw = (longitude / width).floor();
    let mut index = if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    };
    let mut offset = (longitude - index as f64 * width).max(0.0);

    if width - offset <= BOUNDARY_EPSILON && index + 1 < count {
        index += 1;
        offset = 0.0;
    }

    (index, offset)
}

/// Full zodiacal decomposition of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub sign_lord: Lord,
    pub nakshatra_index: usize,
    pub nakshatra: &'static str,
    pub nakshatra_lord: Lord,
    pub pada: u8,
    /// Degrees already traversed inside the nakshatra.
    pub nakshatra_offset: f64,
    /// `nakshatra_offset / NAKSHATRA_WIDTH`, in [0, 1].
    pub elapsed_fraction: f64,
}

/// Nakshatra index (0..=26) and offset within it.
pub fn nakshatra_position(longitude: f64) -> (usize, f64) {
    segment(normalize_degrees(longitude), NAKSHATRA_WIDTH, NAKSHATRA_COUNT)
}

pub fn nakshatra_index(longitude: f64) -> usize {
    nakshatra_position(longitude).0
}

/// Pada (1..=4) for an offset within a nakshatra.
pub fn pada_for_offset(offset: f64) -> u8 {
    let (quarter, _) = segment(offset, PADA_WIDTH, 4);
    (quarter as u8 + 1).clamp(1, 4)
}

pub fn pada(longitude: f64) -> u8 {
    pada_for_offset(nakshatra_position(longitude).1)
}

/// Return sign, nakshatra and pada data for the given longitude.
pub fn decompose(longitude: f64) -> Placement {
    let lon = normalize_degrees(longitude);
    let (sign_index, degree_in_sign) = segment(lon, SIGN_WIDTH, 12);
    let sign = Sign::from_index(sign_index);
    let (nakshatra_index, offset) = segment(lon, NAKSHATRA_WIDTH, NAKSHATRA_COUNT);
    let entry = &NAKSHATRAS[nakshatra_index];

    Placement {
        longitude: lon,
        sign,
        degree_in_sign,
        sign_lord: sign.lord(),
        nakshatra_index,
        nakshatra: entry.name,
        nakshatra_lord: entry.lord,
        pada: pada_for_offset(offset),
        nakshatra_offset: offset,
        elapsed_fraction: offset / NAKSHATRA_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vedic::types::VIMSHOTTARI;

    #[test]
    fn test_lords_repeat_vimshottari_order() {
        for (i, entry) in NAKSHATRAS.iter().enumerate() {
            assert_eq!(entry.lord, VIMSHOTTARI[i % 9].0);
        }
    }

    #[test]
    fn test_segment_snaps_near_boundary() {
        let (idx, offset) = segment(NAKSHATRA_WIDTH - 1e-9, NAKSHATRA_WIDTH, NAKSHATRA_COUNT);
        assert_eq!(idx, 1);
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn test_segment_last_segment_keeps_value() {
        let (idx, _) = segment(360.0 - 1e-9, NAKSHATRA_WIDTH, NAKSHATRA_COUNT);
        assert_eq!(idx, 26);
        let (quarter, _) = segment(PADA_WIDTH * 4.0 - 1e-9, PADA_WIDTH, 4);
        assert_eq!(quarter, 3);
    }

    #[test]
    fn test_segment_clamps_overflow() {
        let (idx, _) = segment(360.0, NAKSHATRA_WIDTH, NAKSHATRA_COUNT);
        assert_eq!(idx, 26);
    }

    #[test]
    fn test_get_nakshatra_for_longitude() {
        let meta = decompose(0.0);
        assert_eq!(meta.nakshatra, "Ashwini");
        assert_eq!(meta.nakshatra_lord, Lord::Ketu);
        assert_eq!(meta.pada, 1);

        let meta2 = decompose(13.33);
        assert_eq!(meta2.nakshatra, "Ashwini");
        assert_eq!(meta2.pada, 4);
    }

    #[test]
    fn test_pada_boundaries() {
        assert_eq!(pada(PADA_WIDTH - 0.001), 1);
        assert_eq!(pada(PADA_WIDTH), 2);
        assert_eq!(pada(2.0 * PADA_WIDTH), 3);
        assert_eq!(pada(3.0 * PADA_WIDTH + 0.001), 4);
    }
}
