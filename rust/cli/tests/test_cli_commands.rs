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

#[test]
fn strategies_lists_names_and_classes() {
    let (code, out, _) = run_cli(&["strategies"]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 11);
    for (name, class) in [
        ("martingale", "[red/black]"),
        ("grand_martingale", "[red/black]"),
        ("fibonacci", "[low (1-18)]"),
        ("paroli", "[even/odd]"),
        ("oscars_grind", "[high (19-36)]"),
        ("flat", "[all numbers]"),
    ] {
        let line = out
            .lines()
            .find(|l| l.trim_start().starts_with(&format!("{} ", name)))
            .unwrap_or_else(|| panic!("no line for {}", name));
        assert!(line.contains(class), "{}", line);
    }
}

#[test]
fn spin_is_deterministic_per_seed() {
    let (code, a, _) = run_cli(&["spin", "--seed", "2024", "--count", "25"]);
    assert_eq!(code, 0);
    let (_, b, _) = run_cli(&["spin", "--seed", "2024", "--count", "25"]);
    let (_, c, _) = run_cli(&["spin", "--seed", "2025", "--count", "25"]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.lines().count(), 26);
    for line in a.lines().skip(1) {
        assert!(
            line.contains("red") || line.contains("black") || line.contains("green"),
            "{}",
            line
        );
    }
}

#[test]
fn spin_without_seed_reports_the_drawn_seed() {
    let (code, out, _) = run_cli(&["spin", "--count", "1"]);
    assert_eq!(code, 0);
    let seed_line = out.lines().next().unwrap();
    assert!(seed_line.strip_prefix("Seed: ").unwrap().parse::<u64>().is_ok());
}

#[test]
fn bad_arguments_exit_with_usage() {
    let (code, out, err) = run_cli(&["spin", "--count", "many"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Commands:"));

    let (code, _, err) = run_cli(&[]);
    assert_eq!(code, 2);
    assert!(err.contains("Usage: wheelsim"));
}

#[test]
fn version_prints_to_stdout() {
    let (code, out, err) = run_cli(&["--version"]);
    assert_eq!(code, 0);
    assert!(out.contains("wheelsim"));
    assert!(err.is_empty());
}
