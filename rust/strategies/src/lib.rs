//! # wheelsim-strategies: Betting Progressions
//!
//! The closed set of betting policies the simulator can run. Every policy implements
//! [`Strategy`] and is built with the same `(initial_bankroll, min_bet)` constructor,
//! either directly or through [`StrategyKind`], which also acts as a
//! [`StrategyFactory`] for the simulator.
//!
//! ## Quick Start
//!
//! ```rust
//! use wheelsim_strategies::{create_strategy, StrategyKind};
//!
//! let martingale = create_strategy("martingale", 100.0, 1.0).unwrap();
//! assert_eq!(martingale.name(), "martingale");
//! assert_eq!(martingale.calculate_bet().total(), 1.0);
//!
//! assert!("roulette-wizard".parse::<StrategyKind>().is_err());
//! ```
//!
//! ## Available Strategies
//!
//! - `flat` - one base unit on red, every spin
//! - `martingale` - doubles on red after each loss
//! - `grand_martingale` - doubles plus extra units, alternating colors
//! - `fibonacci` - Fibonacci multiples after consecutive losses
//! - `dalembert` - one unit up per loss, one unit down per win
//! - `labouchere` - cancellation sequence worth 10% of the bankroll
//! - `oscars_grind` - grinds back the cycle deficit, aiming for +5%
//! - `paroli` - doubles on wins, up to three in a row
//! - `one_three_two_six` - 1, 3, 2, 6 units on consecutive wins
//! - `james_bond` - 14 units high, 5 on the 13-18 six-line, 1 on zero

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Strategy, StrategyFactory};

pub mod dalembert;
pub mod fibonacci;
pub mod flat;
pub mod grand_martingale;
pub mod james_bond;
pub mod labouchere;
pub mod martingale;
pub mod one_three_two_six;
pub mod oscars_grind;
pub mod paroli;

pub use dalembert::DAlembert;
pub use fibonacci::Fibonacci;
pub use flat::Flat;
pub use grand_martingale::GrandMartingale;
pub use james_bond::JamesBond;
pub use labouchere::Labouchere;
pub use martingale::Martingale;
pub use one_three_two_six::OneThreeTwoSix;
pub use oscars_grind::OscarsGrind;
pub use paroli::Paroli;

/// Identifies one of the built-in strategies.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Flat,
    Martingale,
    GrandMartingale,
    Fibonacci,
    #[serde(rename = "dalembert")]
    DAlembert,
    Labouchere,
    OscarsGrind,
    Paroli,
    OneThreeTwoSix,
    JamesBond,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 10] = [
        StrategyKind::Flat,
        StrategyKind::Martingale,
        StrategyKind::GrandMartingale,
        StrategyKind::Fibonacci,
        StrategyKind::DAlembert,
        StrategyKind::Labouchere,
        StrategyKind::OscarsGrind,
        StrategyKind::Paroli,
        StrategyKind::OneThreeTwoSix,
        StrategyKind::JamesBond,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Flat => "flat",
            StrategyKind::Martingale => "martingale",
            StrategyKind::GrandMartingale => "grand_martingale",
            StrategyKind::Fibonacci => "fibonacci",
            StrategyKind::DAlembert => "dalembert",
            StrategyKind::Labouchere => "labouchere",
            StrategyKind::OscarsGrind => "oscars_grind",
            StrategyKind::Paroli => "paroli",
            StrategyKind::OneThreeTwoSix => "one_three_two_six",
            StrategyKind::JamesBond => "james_bond",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::Flat => "One base unit on red every spin",
            StrategyKind::Martingale => "Double the red bet after each loss, reset on a win",
            StrategyKind::GrandMartingale => {
                "Double plus two extra units per loss, switching color every 12 spins"
            }
            StrategyKind::Fibonacci => "Fibonacci multiples of the base unit after losses",
            StrategyKind::DAlembert => "One more unit per consecutive loss, reset after five",
            StrategyKind::Labouchere => "Cancel the ends of a sequence worth 10% of the bankroll",
            StrategyKind::OscarsGrind => "Bet back the cycle deficit, aiming for +5% per cycle",
            StrategyKind::Paroli => "Double after each win, back to base after three",
            StrategyKind::OneThreeTwoSix => "1, 3, 2 then 6 units on consecutive wins",
            StrategyKind::JamesBond => "14 units high, 5 on the 13-18 six-line, 1 on zero",
        }
    }

    /// Builds a fresh strategy of this kind.
    pub fn create(
        self,
        initial_bankroll: f64,
        min_bet: f64,
    ) -> Result<Box<dyn Strategy>, ConfigError> {
        Ok(match self {
            StrategyKind::Flat => Box::new(Flat::new(initial_bankroll, min_bet)?),
            StrategyKind::Martingale => Box::new(Martingale::new(initial_bankroll, min_bet)?),
            StrategyKind::GrandMartingale => {
                Box::new(GrandMartingale::new(initial_bankroll, min_bet)?)
            }
            StrategyKind::Fibonacci => Box::new(Fibonacci::new(initial_bankroll, min_bet)?),
            StrategyKind::DAlembert => Box::new(DAlembert::new(initial_bankroll, min_bet)?),
            StrategyKind::Labouchere => Box::new(Labouchere::new(initial_bankroll, min_bet)?),
            StrategyKind::OscarsGrind => Box::new(OscarsGrind::new(initial_bankroll, min_bet)?),
            StrategyKind::Paroli => Box::new(Paroli::new(initial_bankroll, min_bet)?),
            StrategyKind::OneThreeTwoSix => {
                Box::new(OneThreeTwoSix::new(initial_bankroll, min_bet)?)
            }
            StrategyKind::JamesBond => Box::new(JamesBond::new(initial_bankroll, min_bet)?),
        })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    /// Case-insensitive; `-` and spaces count as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let kind = match key.as_str() {
            "flat" => StrategyKind::Flat,
            "martingale" => StrategyKind::Martingale,
            "grand_martingale" | "grande_martingale" => StrategyKind::GrandMartingale,
            "fibonacci" => StrategyKind::Fibonacci,
            "dalembert" | "d'alembert" => StrategyKind::DAlembert,
            "labouchere" => StrategyKind::Labouchere,
            "oscars_grind" | "oscar" => StrategyKind::OscarsGrind,
            "paroli" => StrategyKind::Paroli,
            "one_three_two_six" | "1_3_2_6" => StrategyKind::OneThreeTwoSix,
            "james_bond" => StrategyKind::JamesBond,
            _ => return Err(ConfigError::UnknownStrategy(s.to_string())),
        };
        Ok(kind)
    }
}

impl StrategyFactory for StrategyKind {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn build(
        &self,
        initial_bankroll: f64,
        min_bet: f64,
    ) -> Result<Box<dyn Strategy>, ConfigError> {
        self.create(initial_bankroll, min_bet)
    }
}

/// Creates a strategy by name.
///
/// # Errors
///
/// [`ConfigError::UnknownStrategy`] for an unrecognised name, or the bankroll
/// validation error from the strategy's constructor.
pub fn create_strategy(
    name: &str,
    initial_bankroll: f64,
    min_bet: f64,
) -> Result<Box<dyn Strategy>, ConfigError> {
    name.parse::<StrategyKind>()?.create(initial_bankroll, min_bet)
}
