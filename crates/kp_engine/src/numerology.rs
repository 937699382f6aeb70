//! Chaldean name numbers and birth-date life path numbers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Chaldean letter values. No letter carries 9.
#[rustfmt::skip]
const CHALDEAN: [(char, u32); 26] = [
    ('A', 1), ('I', 1), ('J', 1), ('Q', 1), ('Y', 1),
    ('B', 2), ('K', 2), ('R', 2),
    ('C', 3), ('G', 3), ('L', 3), ('S', 3),
    ('D', 4), ('M', 4), ('T', 4),
    ('E', 5), ('H', 5), ('N', 5), ('X', 5),
    ('U', 6), ('V', 6), ('W', 6),
    ('O', 7), ('Z', 7),
    ('F', 8), ('P', 8),
];

fn letter_value(ch: char) -> u32 {
    let upper = ch.to_ascii_uppercase();
    CHALDEAN
        .iter()
        .find(|(letter, _)| *letter == upper)
        .map_or(0, |(_, value)| *value)
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Repeatedly sum decimal digits until a single digit remains.
pub fn reduce_to_digit(mut n: u32) -> u8 {
    while n > 9 {
        n = digit_sum(n);
    }
    n as u8
}

/// Chaldean name number. Letters outside A-Z count as zero; blank names have no number.
pub fn name_number(name: &str) -> Option<u8> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let total = name
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .fold(0u32, |acc, ch| acc.saturating_add(letter_value(ch)));
    Some(reduce_to_digit(total))
}

/// Life path number: the digits of `DDMMYYYY` summed and reduced.
pub fn life_path(date: NaiveDate) -> u8 {
    let year = date.year().unsigned_abs();
    reduce_to_digit(digit_sum(date.day()) + digit_sum(date.month()) + digit_sum(year))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Numerology {
    pub name_number: Option<u8>,
    pub life_path: u8,
}

impl Numerology {
    pub fn new(name: Option<&str>, birth_date: NaiveDate) -> Self {
        Self {
            name_number: name.and_then(name_number),
            life_path: life_path(birth_date),
        }
    }
}
