//! Frequency analysis of winning numbers.
//!
//! A winning number is the outcome of a spin with positive net winnings. Within each
//! session, consecutive winning numbers form pairs and triplets (sorted, so `[8, 3]`
//! and `[3, 8]` are the same pattern); every winning number also counts toward the
//! color, parity, dozen and column it belongs to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::strategy::NumberClass;
use crate::wheel::Outcome;

/// How many entries the top lists keep.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PatternClass {
    Red,
    Black,
    Even,
    Odd,
    Dozen(u8),
    Column(u8),
}

impl PatternClass {
    fn classify(outcome: Outcome) -> Vec<PatternClass> {
        let mut out = Vec::with_capacity(4);
        if outcome.is_red() {
            out.push(PatternClass::Red);
        } else if outcome.is_black() {
            out.push(PatternClass::Black);
        }
        if outcome.is_even() {
            out.push(PatternClass::Even);
        } else if outcome.is_odd() {
            out.push(PatternClass::Odd);
        }
        if let Some(d) = outcome.dozen() {
            out.push(PatternClass::Dozen(d));
        }
        if let Some(c) = outcome.column() {
            out.push(PatternClass::Column(c));
        }
        out
    }
}

/// A recurring shape among winning numbers. Serialized as a label such as
/// `"3-8"`, `"3-8-21"`, `"red"` or `"dozen_2"`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Pattern {
    Numbers(Vec<Outcome>),
    Class(PatternClass),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Numbers(ns) => {
                let labels: Vec<String> = ns.iter().map(|o| o.to_string()).collect();
                f.write_str(&labels.join("-"))
            }
            Pattern::Class(PatternClass::Red) => f.write_str("red"),
            Pattern::Class(PatternClass::Black) => f.write_str("black"),
            Pattern::Class(PatternClass::Even) => f.write_str("even"),
            Pattern::Class(PatternClass::Odd) => f.write_str("odd"),
            Pattern::Class(PatternClass::Dozen(d)) => write!(f, "dozen_{}", d),
            Pattern::Class(PatternClass::Column(c)) => write!(f, "column_{}", c),
        }
    }
}

impl From<Pattern> for String {
    fn from(p: Pattern) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Pattern {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let class = match value.as_str() {
            "red" => Some(PatternClass::Red),
            "black" => Some(PatternClass::Black),
            "even" => Some(PatternClass::Even),
            "odd" => Some(PatternClass::Odd),
            other => {
                let parse_idx = |s: &str| s.parse::<u8>().ok().filter(|n| (1..=3).contains(n));
                if let Some(d) = other.strip_prefix("dozen_").and_then(parse_idx) {
                    Some(PatternClass::Dozen(d))
                } else {
                    other
                        .strip_prefix("column_")
                        .and_then(parse_idx)
                        .map(PatternClass::Column)
                }
            }
        };
        if let Some(c) = class {
            return Ok(Pattern::Class(c));
        }
        let numbers = value
            .split('-')
            .map(|s| s.parse::<Outcome>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        if (2..=3).contains(&numbers.len()) {
            Ok(Pattern::Numbers(numbers))
        } else {
            Err(format!("Invalid pattern: {}", value))
        }
    }
}

/// A value together with how often it was seen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Frequency<T> {
    pub value: T,
    pub count: u64,
}

/// Running counts over the winning numbers of many sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternCounts {
    numbers: BTreeMap<Outcome, u64>,
    patterns: BTreeMap<Pattern, u64>,
}

impl PatternCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one session's winning numbers, in spin order.
    pub fn observe_session(&mut self, winning: &[Outcome]) {
        for &o in winning {
            *self.numbers.entry(o).or_insert(0) += 1;
            for class in PatternClass::classify(o) {
                *self.patterns.entry(Pattern::Class(class)).or_insert(0) += 1;
            }
        }
        for size in [2, 3] {
            for window in winning.windows(size) {
                let mut key = window.to_vec();
                key.sort();
                *self.patterns.entry(Pattern::Numbers(key)).or_insert(0) += 1;
            }
        }
    }

    pub fn number_count(&self, outcome: Outcome) -> u64 {
        self.numbers.get(&outcome).copied().unwrap_or(0)
    }

    pub fn pattern_count(&self, pattern: &Pattern) -> u64 {
        self.patterns.get(pattern).copied().unwrap_or(0)
    }

    /// Most frequent winning numbers inside `class`, ties in wheel order.
    pub fn top_numbers(&self, class: NumberClass, n: usize) -> Vec<Frequency<Outcome>> {
        top_n(
            self.numbers
                .iter()
                .filter(|(o, _)| class.contains(**o))
                .map(|(o, c)| (*o, *c)),
            n,
        )
    }

    pub fn top_patterns(&self, n: usize) -> Vec<Frequency<Pattern>> {
        top_n(self.patterns.iter().map(|(p, c)| (p.clone(), *c)), n)
    }
}

// Input comes from a BTreeMap, so a stable sort on count keeps ties in key order.
fn top_n<T>(items: impl Iterator<Item = (T, u64)>, n: usize) -> Vec<Frequency<T>> {
    let mut v: Vec<(T, u64)> = items.collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    v.into_iter()
        .take(n)
        .map(|(value, count)| Frequency { value, count })
        .collect()
}
