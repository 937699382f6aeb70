//! Lords, signs and chart points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine Vimshottari lords, in canonical dasha order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lord {
    Ketu,
    Venus,
    Sun,
    Moon,
    Mars,
    Rahu,
    Jupiter,
    Saturn,
    Mercury,
}

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// (lord, years) in dasha order. Weights sum to [`VIMSHOTTARI_TOTAL_YEARS`].
pub const VIMSHOTTARI: [(Lord, f64); 9] = [
    (Lord::Ketu, 7.0),
    (Lord::Venus, 20.0),
    (Lord::Sun, 6.0),
    (Lord::Moon, 10.0),
    (Lord::Mars, 7.0),
    (Lord::Rahu, 18.0),
    (Lord::Jupiter, 16.0),
    (Lord::Saturn, 19.0),
    (Lord::Mercury, 17.0),
];

impl Lord {
    /// Position in the Vimshottari sequence (Ketu = 0).
    pub const fn sequence_index(self) -> usize {
        match self {
            Lord::Ketu => 0,
            Lord::Venus => 1,
            Lord::Sun => 2,
            Lord::Moon => 3,
            Lord::Mars => 4,
            Lord::Rahu => 5,
            Lord::Jupiter => 6,
            Lord::Saturn => 7,
            Lord::Mercury => 8,
        }
    }

    /// Full Vimshottari allotment in years.
    pub const fn years(self) -> f64 {
        VIMSHOTTARI[self.sequence_index()].1
    }

    /// The lord `steps` places after this one in the cycle.
    pub const fn nth_after(self, steps: usize) -> Lord {
        VIMSHOTTARI[(self.sequence_index() + steps) % VIMSHOTTARI.len()].0
    }

    pub const fn name(self) -> &'static str {
        match self {
            Lord::Ketu => "Ketu",
            Lord::Venus => "Venus",
            Lord::Sun => "Sun",
            Lord::Moon => "Moon",
            Lord::Mars => "Mars",
            Lord::Rahu => "Rahu",
            Lord::Jupiter => "Jupiter",
            Lord::Saturn => "Saturn",
            Lord::Mercury => "Mercury",
        }
    }
}

impl fmt::Display for Lord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

pub const SIGN_WIDTH: f64 = 30.0;

impl Sign {
    pub fn from_index(index: usize) -> Sign {
        SIGNS[index % SIGNS.len()]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Classical (seven-planet) ruler.
    pub const fn lord(self) -> Lord {
        match self {
            Sign::Aries | Sign::Scorpio => Lord::Mars,
            Sign::Taurus | Sign::Libra => Lord::Venus,
            Sign::Gemini | Sign::Virgo => Lord::Mercury,
            Sign::Cancer => Lord::Moon,
            Sign::Leo => Lord::Sun,
            Sign::Sagittarius | Sign::Pisces => Lord::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Lord::Saturn,
        }
    }

    /// The sign six places away.
    pub fn opposite(self) -> Sign {
        Sign::from_index(self.index() + 6)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bodies whose positions come from the ephemeris. Ketu is never queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
}

pub const QUERIED_BODIES: [Body; 8] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
];

impl Body {
    pub const fn name(self) -> &'static str {
        Point::from_body(self).name()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ten points reported on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Ascendant,
}

pub const CHART_POINTS: [Point; 10] = [
    Point::Ascendant,
    Point::Sun,
    Point::Moon,
    Point::Mars,
    Point::Mercury,
    Point::Jupiter,
    Point::Venus,
    Point::Saturn,
    Point::Rahu,
    Point::Ketu,
];

impl Point {
    pub const fn from_body(body: Body) -> Point {
        match body {
            Body::Sun => Point::Sun,
            Body::Moon => Point::Moon,
            Body::Mars => Point::Mars,
            Body::Mercury => Point::Mercury,
            Body::Jupiter => Point::Jupiter,
            Body::Venus => Point::Venus,
            Body::Saturn => Point::Saturn,
            Body::Rahu => Point::Rahu,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Point::Sun => "Sun",
            Point::Moon => "Moon",
            Point::Mars => "Mars",
            Point::Mercury => "Mercury",
            Point::Jupiter => "Jupiter",
            Point::Venus => "Venus",
            Point::Saturn => "Saturn",
            Point::Rahu => "Rahu",
            Point::Ketu => "Ketu",
            Point::Ascendant => "Ascendant",
        }
    }
}

impl From<Body> for Point {
    fn from(body: Body) -> Self {
        Point::from_body(body)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
