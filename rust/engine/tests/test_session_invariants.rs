use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::record::TerminationReason;
use wheelsim_engine::session::{Session, SessionConfig, SessionState};
use wheelsim_engine::strategy::{Bankroll, Strategy};

/// Doubles on red after every loss, uncapped except by the bankroll.
struct Doubler {
    ledger: Bankroll,
    losses: u32,
}

impl Doubler {
    fn boxed(bankroll: f64) -> Box<dyn Strategy> {
        Box::new(Doubler {
            ledger: Bankroll::new(bankroll, 1.0).unwrap(),
            losses: 0,
        })
    }
}

impl Strategy for Doubler {
    fn name(&self) -> &str {
        "doubler"
    }
    fn calculate_bet(&self) -> Bet {
        let wanted = 2f64.powi(self.losses as i32);
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }
    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        if winnings > 0.0 {
            self.losses = 0;
        } else {
            self.losses += 1;
        }
    }
    fn reset(&mut self) {
        self.ledger.reset();
        self.losses = 0;
    }
    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }
    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }
}

fn config(max_spins: usize, profit_target: f64) -> SessionConfig {
    SessionConfig {
        max_spins,
        profit_target,
    }
}

#[test]
fn bet_never_exceeds_bankroll_at_tick_start() {
    for seed in 0..20 {
        let result = Session::new(Doubler::boxed(50.0), seed, config(500, 1.0))
            .run()
            .unwrap();
        let starts = &result.bankroll_history[..result.num_spins];
        for (spin, start) in result.spins.iter().zip(starts) {
            assert!(spin.bet.total() <= *start + 1e-9);
            assert!(spin.bet.iter().all(|(_, s)| *s >= 0.0));
        }
    }
}

#[test]
fn every_session_ends_in_one_terminal_state_within_limit() {
    for seed in 0..50 {
        let mut session = Session::new(Doubler::boxed(30.0), seed, config(40, 0.2));
        let mut ticks = 0;
        while session.state() == SessionState::Active {
            session.step().unwrap();
            ticks += 1;
        }
        assert!(ticks <= 40);
        let r = session.get_results().unwrap();
        assert_eq!(r.num_spins, ticks);
        match r.termination_reason {
            TerminationReason::Bankruptcy => assert!(r.final_bankroll < 1.0),
            TerminationReason::MaxSpinsReached => assert_eq!(r.num_spins, 40),
            TerminationReason::ProfitTargetReached => assert!(r.final_bankroll >= 36.0),
        }
    }
}

#[test]
fn bankruptcy_takes_priority_over_spin_limit() {
    // One spin, all-in on a single pocket: either bust or far above the target.
    struct AllIn(Bankroll);
    impl Strategy for AllIn {
        fn name(&self) -> &str {
            "all_in"
        }
        fn calculate_bet(&self) -> Bet {
            Bet::single(BetTarget::Straight(wheelsim_engine::wheel::Outcome::ZERO), self.0.current())
        }
        fn update_bankroll(&mut self, winnings: f64) {
            self.0.apply(winnings)
        }
        fn reset(&mut self) {
            self.0.reset()
        }
        fn ledger(&self) -> &Bankroll {
            &self.0
        }
        fn ledger_mut(&mut self) -> &mut Bankroll {
            &mut self.0
        }
    }

    let mut saw_bust = false;
    for seed in 0..30 {
        let s = Box::new(AllIn(Bankroll::new(10.0, 1.0).unwrap()));
        let r = Session::new(s, seed, config(1, 0.5)).run().unwrap();
        if r.final_bankroll == 0.0 {
            saw_bust = true;
            assert_eq!(r.termination_reason, TerminationReason::Bankruptcy);
        } else {
            // spin limit outranks profit target
            assert_eq!(r.termination_reason, TerminationReason::MaxSpinsReached);
        }
    }
    assert!(saw_bust);
}

#[test]
fn same_seed_same_session() {
    let a = Session::new(Doubler::boxed(100.0), 99, config(300, 0.5))
        .run()
        .unwrap();
    let b = Session::new(Doubler::boxed(100.0), 99, config(300, 0.5))
        .run()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn strategy_ledger_matches_session_record() {
    let mut session = Session::new(Doubler::boxed(100.0), 5, config(25, 10.0));
    while session.state() == SessionState::Active {
        session.step().unwrap();
    }
    let stats = session.strategy().get_statistics();
    let r = session.get_results().unwrap();
    assert_eq!(stats.total_spins, r.num_spins);
    assert_eq!(stats.wins, r.wins);
    assert_eq!(stats.current_bankroll, r.final_bankroll);
    assert_eq!(session.strategy().ledger().spin_history().len(), r.num_spins);
}
