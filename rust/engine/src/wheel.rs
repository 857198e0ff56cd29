use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TableError;

/// Number of pockets on an American wheel (0, 00 and 1-36).
pub const WHEEL_SIZE: usize = 38;

/// Red numbers on the layout. Every other number in 1-36 is black.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

const DOUBLE_ZERO_INDEX: u8 = 37;

/// Pocket color. Only 0 and 00 are green.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// One of the 18 red numbers
    Red,
    /// One of the 18 black numbers
    Black,
    /// 0 or 00
    Green,
}

/// A single pocket of the American wheel.
///
/// Internally the pocket is stored as an index in `0..38` where `0..=36` are the
/// printed numbers and `37` is double zero, so `00` sorts after `36`.
/// Serialized as its printed label (`"0"`, `"00"`, `"17"`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Outcome(u8);

impl Outcome {
    pub const ZERO: Outcome = Outcome(0);
    pub const DOUBLE_ZERO: Outcome = Outcome(DOUBLE_ZERO_INDEX);

    /// Pocket for a printed number in `0..=36`.
    pub fn number(n: u8) -> Option<Outcome> {
        (n <= 36).then_some(Outcome(n))
    }

    /// Pocket for a wheel index in `0..38` (37 is `00`).
    pub fn from_index(index: usize) -> Option<Outcome> {
        (index < WHEEL_SIZE).then_some(Outcome(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The printed number for 1-36, `None` for the two green pockets.
    pub fn as_number(self) -> Option<u8> {
        (1..=36).contains(&self.0).then_some(self.0)
    }

    pub fn is_green(self) -> bool {
        self.as_number().is_none()
    }

    pub fn color(self) -> Color {
        match self.as_number() {
            None => Color::Green,
            Some(n) if RED_NUMBERS.contains(&n) => Color::Red,
            Some(_) => Color::Black,
        }
    }

    pub fn is_red(self) -> bool {
        self.color() == Color::Red
    }

    pub fn is_black(self) -> bool {
        self.color() == Color::Black
    }

    /// Even-money parity; zero and double zero are neither even nor odd.
    pub fn is_even(self) -> bool {
        self.as_number().is_some_and(|n| n % 2 == 0)
    }

    pub fn is_odd(self) -> bool {
        self.as_number().is_some_and(|n| n % 2 == 1)
    }

    /// 1-18
    pub fn is_low(self) -> bool {
        self.as_number().is_some_and(|n| n <= 18)
    }

    /// 19-36
    pub fn is_high(self) -> bool {
        self.as_number().is_some_and(|n| n >= 19)
    }

    /// Dozen 1, 2 or 3.
    pub fn dozen(self) -> Option<u8> {
        self.as_number().map(|n| (n - 1) / 12 + 1)
    }

    /// Column 1, 2 or 3 (column 1 holds 1, 4, 7, ...).
    pub fn column(self) -> Option<u8> {
        self.as_number().map(|n| (n - 1) % 3 + 1)
    }

    /// Street (row of three) 1-12.
    pub fn street(self) -> Option<u8> {
        self.as_number().map(|n| (n - 1) / 3 + 1)
    }

    /// Whether this pocket belongs to the corner whose lowest number is `top_left`.
    pub fn in_corner(self, top_left: u8) -> bool {
        if !is_corner_anchor(top_left) {
            return false;
        }
        self.as_number()
            .is_some_and(|n| [top_left, top_left + 1, top_left + 3, top_left + 4].contains(&n))
    }

    /// Lowest numbers of every corner that contains this pocket.
    pub fn corners(self) -> Vec<u8> {
        (1..=32).filter(|&c| self.in_corner(c)).collect()
    }
}

/// A corner is anchored on a number that is not in the third column and not in the last street.
pub fn is_corner_anchor(n: u8) -> bool {
    (1..=32).contains(&n) && n % 3 != 0
}

pub fn all_outcomes() -> [Outcome; WHEEL_SIZE] {
    let mut v = [Outcome::ZERO; WHEEL_SIZE];
    for (i, slot) in v.iter_mut().enumerate() {
        *slot = Outcome(i as u8);
    }
    v
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == DOUBLE_ZERO_INDEX {
            f.write_str("00")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Outcome {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "00" {
            return Ok(Outcome::DOUBLE_ZERO);
        }
        s.parse::<u8>()
            .ok()
            .and_then(Outcome::number)
            .ok_or_else(|| TableError::UnknownLabel(s.to_string()))
    }
}

impl From<Outcome> for String {
    fn from(o: Outcome) -> Self {
        o.to_string()
    }
}

impl TryFrom<String> for Outcome {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_has_38_distinct_pockets() {
        let all = all_outcomes();
        let labels: std::collections::HashSet<String> =
            all.iter().map(|o| o.to_string()).collect();
        assert_eq!(labels.len(), 38);
        assert!(labels.contains("0"));
        assert!(labels.contains("00"));
        assert!(labels.contains("36"));
    }

    #[test]
    fn color_partition_is_18_18_2() {
        let all = all_outcomes();
        assert_eq!(all.iter().filter(|o| o.is_red()).count(), 18);
        assert_eq!(all.iter().filter(|o| o.is_black()).count(), 18);
        assert_eq!(all.iter().filter(|o| o.is_green()).count(), 2);
    }

    #[test]
    fn zeros_lose_every_outside_property() {
        for z in [Outcome::ZERO, Outcome::DOUBLE_ZERO] {
            assert!(!z.is_even() && !z.is_odd());
            assert!(!z.is_low() && !z.is_high());
            assert_eq!(z.dozen(), None);
            assert_eq!(z.column(), None);
            assert_eq!(z.street(), None);
            assert!(z.corners().is_empty());
        }
    }

    #[test]
    fn derived_properties_for_known_numbers() {
        let n = Outcome::number(17).unwrap();
        assert_eq!(n.color(), Color::Black);
        assert!(n.is_odd() && n.is_low());
        assert_eq!(n.dozen(), Some(2));
        assert_eq!(n.column(), Some(2));
        assert_eq!(n.street(), Some(6));

        let n = Outcome::number(36).unwrap();
        assert_eq!(n.color(), Color::Red);
        assert_eq!(n.column(), Some(3));
        assert_eq!(n.street(), Some(12));
        assert_eq!(n.corners(), vec![32]);

        // 5 sits in the middle of the layout and touches four corners
        assert_eq!(Outcome::number(5).unwrap().corners(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn label_parsing() {
        assert_eq!("00".parse::<Outcome>().unwrap(), Outcome::DOUBLE_ZERO);
        assert_eq!("0".parse::<Outcome>().unwrap(), Outcome::ZERO);
        assert_eq!("7".parse::<Outcome>().unwrap().as_number(), Some(7));
        assert!("37".parse::<Outcome>().is_err());
        assert!("red".parse::<Outcome>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Outcome::DOUBLE_ZERO).unwrap();
        assert_eq!(json, "\"00\"");
        let back: Outcome = serde_json::from_str("\"21\"").unwrap();
        assert_eq!(back.as_number(), Some(21));
    }
}
