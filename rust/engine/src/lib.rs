//! # wheelsim-engine: Roulette Strategy Simulation Core
//!
//! A deterministic American roulette simulator for comparing betting progressions.
//! Provides the wheel and paytable, the strategy abstraction, the per-session state
//! machine, and a multi-session simulator with aggregate statistics. Every session
//! is seeded, so sequential and parallel runs produce identical results.
//!
//! ## Core Modules
//!
//! - [`wheel`] - Pockets of the 38-slot wheel and their derived properties
//! - [`bet`] - Bet targets, labels, payout odds and stake maps
//! - [`table`] - Seeded ChaCha20 draws and bet resolution
//! - [`strategy`] - Strategy trait, bankroll ledger and strategy factories
//! - [`session`] - Session state machine driving one strategy to a terminal state
//! - [`record`] - Spin records and session results
//! - [`simulator`] - Multi-session runs, aggregate metrics and history reporting
//! - [`analysis`] - Winning-number and pattern frequencies
//! - [`errors`] - Error types for configuration, bets and sessions
//!
//! ## Quick Start
//!
//! ```rust
//! use wheelsim_engine::bet::{Bet, BetTarget};
//! use wheelsim_engine::table::Table;
//! use wheelsim_engine::wheel::Outcome;
//!
//! let bet = Bet::single(BetTarget::Red, 10.0);
//! let red_seven = Outcome::number(7).unwrap();
//! assert_eq!(Table::resolve(&bet, red_seven).unwrap(), 10.0);
//! assert_eq!(Table::resolve(&bet, Outcome::DOUBLE_ZERO).unwrap(), -10.0);
//! ```
//!
//! ## Deterministic Draws
//!
//! ```rust
//! use wheelsim_engine::table::Table;
//!
//! // Same seed produces the same outcomes
//! let mut t1 = Table::new_with_seed(42);
//! let mut t2 = Table::new_with_seed(42);
//! assert_eq!(t1.draw(), t2.draw());
//! ```

pub mod analysis;
pub mod bet;
pub mod errors;
pub mod record;
pub mod session;
pub mod simulator;
pub mod strategy;
pub mod table;
pub mod wheel;
