use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::TableError;
use crate::wheel::{all_outcomes, is_corner_anchor, Outcome};

/// A region of the layout a stake can be placed on.
///
/// Labels follow a `kind_args` scheme (`"straight_00"`, `"split_1_2"`, `"street_4"`,
/// `"corner_5"`, `"five_number"`, `"six_line_2"`, `"dozen_1"`, `"column_3"`) and the
/// plain names of the even-money bets (`"red"`, `"black"`, `"even"`, `"odd"`, `"low"`, `"high"`).
/// A bare number such as `"17"` is accepted as a straight bet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BetTarget {
    /// Single pocket, 35:1
    Straight(Outcome),
    /// Two adjacent numbers (smaller first), 17:1
    Split(u8, u8),
    /// Row of three numbers, street 1-12, 11:1
    Street(u8),
    /// Four numbers anchored on the lowest one, 8:1
    Corner(u8),
    /// 0, 00, 1, 2, 3, 6:1
    FiveNumber,
    /// Two adjacent streets, identified by the first street 1-11, 5:1
    SixLine(u8),
    /// Dozen 1-3, 2:1
    Dozen(u8),
    /// Column 1-3, 2:1
    Column(u8),
    Red,
    Black,
    Even,
    Odd,
    /// 1-18
    Low,
    /// 19-36
    High,
}

impl BetTarget {
    /// Payout odds to one, excluding the returned stake.
    pub fn payout_odds(&self) -> u32 {
        match self {
            BetTarget::Straight(_) => 35,
            BetTarget::Split(..) => 17,
            BetTarget::Street(_) => 11,
            BetTarget::Corner(_) => 8,
            BetTarget::FiveNumber => 6,
            BetTarget::SixLine(_) => 5,
            BetTarget::Dozen(_) | BetTarget::Column(_) => 2,
            BetTarget::Red
            | BetTarget::Black
            | BetTarget::Even
            | BetTarget::Odd
            | BetTarget::Low
            | BetTarget::High => 1,
        }
    }

    /// Whether the target wins when `outcome` is drawn.
    pub fn covers(&self, outcome: Outcome) -> bool {
        match *self {
            BetTarget::Straight(o) => o == outcome,
            BetTarget::Split(a, b) => outcome
                .as_number()
                .is_some_and(|n| n == a || n == b),
            BetTarget::Street(s) => outcome.street() == Some(s),
            BetTarget::Corner(c) => outcome.in_corner(c),
            BetTarget::FiveNumber => {
                outcome.is_green() || outcome.as_number().is_some_and(|n| n <= 3)
            }
            BetTarget::SixLine(s) => outcome
                .street()
                .is_some_and(|street| street == s || street == s + 1),
            BetTarget::Dozen(d) => outcome.dozen() == Some(d),
            BetTarget::Column(c) => outcome.column() == Some(c),
            BetTarget::Red => outcome.is_red(),
            BetTarget::Black => outcome.is_black(),
            BetTarget::Even => outcome.is_even(),
            BetTarget::Odd => outcome.is_odd(),
            BetTarget::Low => outcome.is_low(),
            BetTarget::High => outcome.is_high(),
        }
    }

    /// Number of pockets covered.
    pub fn coverage(&self) -> usize {
        all_outcomes().iter().filter(|&&o| self.covers(o)).count()
    }

    /// Rejects targets that do not exist on the layout.
    pub fn validate(&self) -> Result<(), TableError> {
        let invalid = |reason: &str| {
            Err(TableError::InvalidTarget {
                target: self.to_string(),
                reason: reason.to_string(),
            })
        };
        match *self {
            BetTarget::Straight(_) | BetTarget::FiveNumber => Ok(()),
            BetTarget::Split(a, b) => {
                if !(1..=36).contains(&a) || !(1..=36).contains(&b) {
                    return invalid("split numbers must be in 1-36");
                }
                let horizontal = b == a + 1 && a % 3 != 0;
                let vertical = b == a + 3;
                if horizontal || vertical {
                    Ok(())
                } else {
                    invalid("numbers are not adjacent")
                }
            }
            BetTarget::Street(s) if (1..=12).contains(&s) => Ok(()),
            BetTarget::Street(_) => invalid("street must be 1-12"),
            BetTarget::Corner(c) if is_corner_anchor(c) => Ok(()),
            BetTarget::Corner(_) => invalid("not the lowest number of a corner"),
            BetTarget::SixLine(s) if (1..=11).contains(&s) => Ok(()),
            BetTarget::SixLine(_) => invalid("six-line must start on street 1-11"),
            BetTarget::Dozen(d) | BetTarget::Column(d) if (1..=3).contains(&d) => Ok(()),
            BetTarget::Dozen(_) | BetTarget::Column(_) => invalid("must be 1-3"),
            BetTarget::Red
            | BetTarget::Black
            | BetTarget::Even
            | BetTarget::Odd
            | BetTarget::Low
            | BetTarget::High => Ok(()),
        }
    }
}

impl fmt::Display for BetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetTarget::Straight(o) => write!(f, "straight_{}", o),
            BetTarget::Split(a, b) => write!(f, "split_{}_{}", a, b),
            BetTarget::Street(s) => write!(f, "street_{}", s),
            BetTarget::Corner(c) => write!(f, "corner_{}", c),
            BetTarget::FiveNumber => f.write_str("five_number"),
            BetTarget::SixLine(s) => write!(f, "six_line_{}", s),
            BetTarget::Dozen(d) => write!(f, "dozen_{}", d),
            BetTarget::Column(c) => write!(f, "column_{}", c),
            BetTarget::Red => f.write_str("red"),
            BetTarget::Black => f.write_str("black"),
            BetTarget::Even => f.write_str("even"),
            BetTarget::Odd => f.write_str("odd"),
            BetTarget::Low => f.write_str("low"),
            BetTarget::High => f.write_str("high"),
        }
    }
}

impl FromStr for BetTarget {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        let unknown = || TableError::UnknownLabel(s.to_string());
        let num = |v: &str| v.parse::<u8>().map_err(|_| unknown());

        let target = match label.as_str() {
            "red" => BetTarget::Red,
            "black" => BetTarget::Black,
            "even" => BetTarget::Even,
            "odd" => BetTarget::Odd,
            "low" => BetTarget::Low,
            "high" => BetTarget::High,
            "five_number" => BetTarget::FiveNumber,
            other => {
                if let Some(rest) = other.strip_prefix("straight_") {
                    BetTarget::Straight(rest.parse()?)
                } else if let Some(rest) = other.strip_prefix("split_") {
                    let (a, b) = rest.split_once('_').ok_or_else(unknown)?;
                    BetTarget::Split(num(a)?, num(b)?)
                } else if let Some(rest) = other.strip_prefix("street_") {
                    BetTarget::Street(num(rest)?)
                } else if let Some(rest) = other.strip_prefix("corner_") {
                    BetTarget::Corner(num(rest)?)
                } else if let Some(rest) = other.strip_prefix("six_line_") {
                    BetTarget::SixLine(num(rest)?)
                } else if let Some(rest) = other.strip_prefix("dozen_") {
                    BetTarget::Dozen(num(rest)?)
                } else if let Some(rest) = other.strip_prefix("column_") {
                    BetTarget::Column(num(rest)?)
                } else if let Ok(o) = other.parse::<Outcome>() {
                    BetTarget::Straight(o)
                } else {
                    return Err(unknown());
                }
            }
        };
        target.validate()?;
        Ok(target)
    }
}

impl From<BetTarget> for String {
    fn from(t: BetTarget) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for BetTarget {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stakes placed for one spin, keyed by target.
///
/// Stakes are never negative: [`Bet::place`] ignores non-positive and non-finite amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bet {
    stakes: BTreeMap<BetTarget, f64>,
}

impl Bet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(target: BetTarget, stake: f64) -> Self {
        let mut bet = Self::new();
        bet.place(target, stake);
        bet
    }

    /// Adds `stake` on `target`, accumulating with any stake already there.
    pub fn place(&mut self, target: BetTarget, stake: f64) {
        if stake.is_finite() && stake > 0.0 {
            *self.stakes.entry(target).or_insert(0.0) += stake;
        }
    }

    /// Builds a bet from `(label, stake)` pairs, rejecting unknown labels.
    pub fn from_labels<'a, I>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut bet = Self::new();
        for (label, stake) in pairs {
            bet.place(label.parse()?, stake);
        }
        Ok(bet)
    }

    pub fn total(&self) -> f64 {
        self.stakes.values().sum()
    }

    pub fn stake_on(&self, target: &BetTarget) -> f64 {
        self.stakes.get(target).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BetTarget, &f64)> {
        self.stakes.iter()
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    /// Scales every stake down proportionally so the total does not exceed `limit`.
    pub fn clamped_to(&self, limit: f64) -> Bet {
        let total = self.total();
        if total <= limit {
            return self.clone();
        }
        if limit <= 0.0 || !limit.is_finite() {
            return Bet::new();
        }
        let factor = limit / total;
        let mut stakes: BTreeMap<BetTarget, f64> = self
            .stakes
            .iter()
            .map(|(t, s)| (*t, s * factor))
            .collect();

        // float rounding can leave the sum a hair above the limit
        for _ in 0..8 {
            let excess = stakes.values().sum::<f64>() - limit;
            if excess <= 0.0 {
                break;
            }
            if let Some(largest) = stakes.values_mut().max_by(|a, b| a.total_cmp(b)) {
                *largest = (*largest - excess.max(*largest * f64::EPSILON)).max(0.0);
            }
        }
        Bet { stakes }
    }
}
