//! KP sub-lord resolution.
//!
//! Every nakshatra is divided into nine unequal parts in proportion to the Vimshottari
//! years, starting with the nakshatra's own lord. The part containing a longitude names its
//! sub-lord.

use serde::Serialize;

use crate::vedic::nakshatra::{nakshatra_position, NAKSHATRAS, NAKSHATRA_COUNT, NAKSHATRA_WIDTH};
use crate::vedic::types::{Lord, VIMSHOTTARI, VIMSHOTTARI_TOTAL_YEARS};

/// 13°20' expressed in arc-minutes.
pub const NAKSHATRA_ARC_MINUTES: f64 = 800.0;

// Absorbs representation error before flooring to whole arc-minutes.
const ARC_MINUTE_EPSILON: f64 = 1e-9;

/// One proportional division of a nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubLordSegment {
    pub lord: Lord,
    /// Absolute sidereal longitude where the division starts.
    pub start: f64,
    pub end: f64,
}

impl SubLordSegment {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// The nine lords starting at `first`, each paired with its weight in years.
fn rotated_sequence(first: Lord) -> impl Iterator<Item = (Lord, f64)> {
    (0..VIMSHOTTARI.len()).map(move |step| {
        let lord = first.nth_after(step);
        (lord, lord.years())
    })
}

/// Sub-lord for a sidereal longitude.
///
/// The offset inside the nakshatra is floored to whole arc-minutes before walking the
/// divisions, and a position exactly on a division boundary belongs to the earlier one.
pub fn sub_lord(longitude: f64) -> Lord {
    let (index, offset) = nakshatra_position(longitude);
    let star_lord = NAKSHATRAS[index].lord;
    let position = (offset * 60.0 + ARC_MINUTE_EPSILON).floor();

    let mut cumulative = 0.0;
    let mut last = star_lord;
    for (lord, years) in rotated_sequence(star_lord) {
        cumulative += years / VIMSHOTTARI_TOTAL_YEARS * NAKSHATRA_ARC_MINUTES;
        if position <= cumulative {
            return lord;
        }
        last = lord;
    }
    // Only reachable through rounding at the very end of the nakshatra.
    last
}

/// The nine sub divisions of a nakshatra as absolute longitudes.
pub fn sub_lord_segments(nakshatra_index: usize) -> [SubLordSegment; 9] {
    let index = nakshatra_index.min(NAKSHATRA_COUNT - 1);
    let star_lord = NAKSHATRAS[index].lord;
    let mut start = index as f64 * NAKSHATRA_WIDTH;
    let mut segments = [SubLordSegment {
        lord: star_lord,
        start,
        end: start,
    }; 9];

    for (slot, (lord, years)) in segments.iter_mut().zip(rotated_sequence(star_lord)) {
        let end = start + years / VIMSHOTTARI_TOTAL_YEARS * NAKSHATRA_WIDTH;
        *slot = SubLordSegment { lord, start, end };
        start = end;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_zodiac_is_ketu() {
        assert_eq!(sub_lord(0.0), Lord::Ketu);
    }

    #[test]
    fn test_rotation_starts_at_star_lord() {
        // Bharani is ruled by Venus, so its first division is Venus.
        assert_eq!(sub_lord(NAKSHATRA_WIDTH + 0.1), Lord::Venus);
        let segments = sub_lord_segments(1);
        assert_eq!(segments[0].lord, Lord::Venus);
        assert_eq!(segments[8].lord, Lord::Ketu);
    }

    #[test]
    fn test_segment_widths_sum_to_nakshatra() {
        for index in 0..NAKSHATRA_COUNT {
            let total: f64 = sub_lord_segments(index).iter().map(|s| s.width()).sum();
            assert!((total - NAKSHATRA_WIDTH).abs() < 1e-9);
        }
    }

    #[test]
    fn test_boundary_belongs_to_earlier_division() {
        // Ketu's division in Ashwini is 7/120 * 800 = 46.67 arc-minutes.
        assert_eq!(sub_lord(46.0 / 60.0), Lord::Ketu);
        assert_eq!(sub_lord(47.0 / 60.0), Lord::Venus);
    }

    #[test]
    fn test_floor_quantization_is_stable_within_a_minute() {
        // 46'59" still floors to 46' and stays with Ketu.
        assert_eq!(sub_lord(46.0 / 60.0 + 59.0 / 3600.0), Lord::Ketu);
    }

    #[test]
    fn test_end_of_nakshatra_is_last_lord() {
        assert_eq!(sub_lord(NAKSHATRA_WIDTH - 0.01), Lord::Mercury);
        assert_eq!(sub_lord(360.0 - 0.01), Lord::Saturn);
    }
}
