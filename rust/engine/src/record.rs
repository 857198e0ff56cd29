use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bet::Bet;
use crate::strategy::NumberClass;
use crate::wheel::Outcome;

/// One tick of a session. Appended once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Drawn pocket
    pub outcome: Outcome,
    /// Bet actually placed, after clamping
    pub bet: Bet,
    /// Net winnings (payout minus stake)
    pub winnings: f64,
    /// Strategy bankroll after the spin was applied
    pub bankroll_after: f64,
}

impl SpinRecord {
    pub fn is_win(&self) -> bool {
        self.winnings > 0.0
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Bankroll fell below the minimum bet
    Bankruptcy,
    /// The spin limit was hit
    MaxSpinsReached,
    /// Bankroll reached initial * (1 + target)
    ProfitTargetReached,
}

impl TerminationReason {
    pub const ALL: [TerminationReason; 3] = [
        TerminationReason::Bankruptcy,
        TerminationReason::MaxSpinsReached,
        TerminationReason::ProfitTargetReached,
    ];
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminationReason::Bankruptcy => "bankruptcy",
            TerminationReason::MaxSpinsReached => "max_spins_reached",
            TerminationReason::ProfitTargetReached => "profit_target_reached",
        };
        f.write_str(s)
    }
}

/// Final, read-only summary of a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub strategy: String,
    /// Characteristic numbers of the strategy that played
    pub number_class: NumberClass,
    /// Seed the session's table was built with
    pub seed: u64,
    pub num_spins: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub initial_bankroll: f64,
    pub final_bankroll: f64,
    pub termination_reason: TerminationReason,
    pub spins: Vec<SpinRecord>,
    /// Starts with the initial bankroll, then one entry per spin
    pub bankroll_history: Vec<f64>,
}

impl SessionResult {
    pub fn profit_loss(&self) -> f64 {
        self.final_bankroll - self.initial_bankroll
    }

    /// Reached the profit target, or ran out of spins while ahead.
    pub fn is_success(&self) -> bool {
        match self.termination_reason {
            TerminationReason::ProfitTargetReached => true,
            TerminationReason::MaxSpinsReached => self.final_bankroll > self.initial_bankroll,
            TerminationReason::Bankruptcy => false,
        }
    }

    /// Outcomes of the spins with positive winnings, in order.
    pub fn winning_numbers(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.spins.iter().filter(|s| s.is_win()).map(|s| s.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(reason: TerminationReason, final_bankroll: f64) -> SessionResult {
        SessionResult {
            strategy: "flat".into(),
            number_class: NumberClass::Any,
            seed: 0,
            num_spins: 0,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            initial_bankroll: 100.0,
            final_bankroll,
            termination_reason: reason,
            spins: vec![],
            bankroll_history: vec![100.0],
        }
    }

    #[test]
    fn success_definition() {
        assert!(result(TerminationReason::ProfitTargetReached, 150.0).is_success());
        assert!(result(TerminationReason::MaxSpinsReached, 101.0).is_success());
        assert!(!result(TerminationReason::MaxSpinsReached, 100.0).is_success());
        assert!(!result(TerminationReason::Bankruptcy, 0.5).is_success());
    }

    #[test]
    fn termination_reason_serializes_snake_case() {
        let s = serde_json::to_string(&TerminationReason::ProfitTargetReached).unwrap();
        assert_eq!(s, "\"profit_target_reached\"");
        assert_eq!(
            TerminationReason::MaxSpinsReached.to_string(),
            "max_spins_reached"
        );
    }
}
