//! Coarse dignity classification for chart points.

use serde::{Deserialize, Serialize};

use crate::vedic::types::{Point, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dignity {
    /// Own sign or exaltation sign.
    Friend,
    Neutral,
    /// Sign opposite the exaltation sign.
    Debilitated,
}

fn own_signs(point: Point) -> &'static [Sign] {
    match point {
        Point::Sun => &[Sign::Leo],
        Point::Moon => &[Sign::Cancer],
        Point::Mars => &[Sign::Aries, Sign::Scorpio],
        Point::Mercury => &[Sign::Gemini, Sign::Virgo],
        Point::Jupiter => &[Sign::Sagittarius, Sign::Pisces],
        Point::Venus => &[Sign::Taurus, Sign::Libra],
        Point::Saturn => &[Sign::Capricorn, Sign::Aquarius],
        Point::Rahu | Point::Ketu | Point::Ascendant => &[],
    }
}

fn exaltation_sign(point: Point) -> Option<Sign> {
    match point {
        Point::Sun => Some(Sign::Aries),
        Point::Moon => Some(Sign::Taurus),
        Point::Mars => Some(Sign::Capricorn),
        Point::Mercury => Some(Sign::Virgo),
        Point::Jupiter => Some(Sign::Cancer),
        Point::Venus => Some(Sign::Pisces),
        Point::Saturn => Some(Sign::Libra),
        Point::Rahu | Point::Ketu | Point::Ascendant => None,
    }
}

/// Dignity of `point` placed in `sign`. The Ascendant has none.
pub fn classify(point: Point, sign: Sign) -> Option<Dignity> {
    if point == Point::Ascendant {
        return None;
    }
    if own_signs(point).contains(&sign) {
        return Some(Dignity::Friend);
    }
    match exaltation_sign(point) {
        Some(exalted) if exalted == sign => Some(Dignity::Friend),
        Some(exalted) if exalted.opposite() == sign => Some(Dignity::Debilitated),
        _ => Some(Dignity::Neutral),
    }
}
