use serde_json::Value;
use tempfile::tempdir;
use wheelsim_cli::io_utils::read_text_auto;
use wheelsim_cli::run;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["wheelsim"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn sim_with_history(history: &str, seed: &str) -> (i32, String, String) {
    run_cli(&[
        "sim",
        "--num-simulations",
        "5",
        "--max-spins",
        "100",
        "--strategy",
        "flat",
        "--strategy",
        "martingale",
        "--seed",
        seed,
        "--history",
        history,
    ])
}

#[test]
fn first_run_creates_history_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("history.json");
    let path = path.to_str().unwrap();

    let (code, out, err) = sim_with_history(path, "7");
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("=== History ==="));
    assert!(out.contains("flat: "));
    assert!(out.contains("first record"));

    let json: Value = serde_json::from_str(&read_text_auto(path).unwrap()).unwrap();
    for name in ["flat", "martingale"] {
        let entry = &json[name];
        let rate = entry["best_win_rate"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&rate));
        let numbers = entry["best_numbers"].as_array().unwrap();
        assert_eq!(entry["wins_count"].as_u64(), Some(numbers.len() as u64));
        assert!(entry["previous_best"].is_null());
        assert!(entry["last_update"].as_str().is_some());
    }
}

#[test]
fn repeated_run_never_lowers_the_best() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let path = path.to_str().unwrap();

    assert_eq!(sim_with_history(path, "7").0, 0);
    let first: Value = serde_json::from_str(&read_text_auto(path).unwrap()).unwrap();

    for seed in ["8", "9", "10"] {
        let (code, out, _) = sim_with_history(path, seed);
        assert_eq!(code, 0);
        assert!(!out.contains("first record"));
    }
    let last: Value = serde_json::from_str(&read_text_auto(path).unwrap()).unwrap();
    for name in ["flat", "martingale"] {
        let before = first[name]["best_win_rate"].as_f64().unwrap();
        let after = last[name]["best_win_rate"].as_f64().unwrap();
        assert!(after >= before, "{}: {} < {}", name, after, before);
    }
}

#[test]
fn history_command_prints_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json.zst");
    let path = path.to_str().unwrap();
    assert_eq!(sim_with_history(path, "11").0, 0);

    let (code, out, err) = run_cli(&["history", "--input", path]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("\nflat:"));
    assert!(out.contains("\nmartingale:"));
    assert!(out.contains("Best win rate:"));
    assert!(out.contains("Last update:"));
}

#[test]
fn history_command_on_missing_file_warns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("none.json");
    let (code, out, err) = run_cli(&["history", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(out.is_empty());
    assert!(err.contains("WARNING: no history at"));
}

#[test]
fn corrupt_history_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();
    let path = path.to_str().unwrap();

    let (code, _, err) = run_cli(&["history", "--input", path]);
    assert_eq!(code, 2);
    assert!(err.contains("malformed history"));

    // sim still succeeds and leaves the damaged file for inspection
    let (code, out, err) = sim_with_history(path, "5");
    assert_eq!(code, 0);
    assert!(err.contains("WARNING: history not updated"));
    assert!(!out.contains("=== History ==="));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "{ not json");
}
