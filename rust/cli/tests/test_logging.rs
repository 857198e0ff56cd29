use tracing::Level;
use wheelsim_cli::logging::init_test_logging;
use wheelsim_cli::run;

#[test]
fn sim_emits_engine_events() {
    let logs = init_test_logging();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        [
            "wheelsim",
            "sim",
            "--strategy",
            "flat",
            "--strategy",
            "martingale",
            "--num-simulations",
            "4",
            "--max-spins",
            "60",
            "--seed",
            "5",
            "--no-history",
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);

    let entries = logs.entries();
    let finished: Vec<_> = entries
        .iter()
        .filter(|e| e.level == Level::INFO && e.message.contains("strategy finished"))
        .collect();
    assert_eq!(finished.len(), 2);
    assert_eq!(finished[0].field("strategy"), Some("flat"));
    assert_eq!(finished[0].field("sessions"), Some("4"));
    assert_eq!(finished[1].field("strategy"), Some("martingale"));

    let sessions = entries
        .iter()
        .filter(|e| e.level == Level::DEBUG && e.message.contains("session finished"))
        .count();
    assert_eq!(sessions, 8);
    assert!(entries.iter().all(|e| e.target.starts_with("wheelsim_engine")));
}
