//! Seeded wheel draws.
//!
//! `spin` prints outcomes from a [`Table`] seeded the same way sessions are, which
//! makes it a quick determinism check: the same seed always prints the same lines.

use std::io::Write;

use wheelsim_engine::table::Table;
use wheelsim_engine::wheel::{Color, Outcome};

use crate::error::CliError;

pub fn handle_spin_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut table = Table::new_with_seed(s);
    writeln!(out, "Seed: {}", s)?;
    for i in 1..=count {
        let outcome = table.draw();
        writeln!(out, "{:>4}: {}", i, describe(outcome))?;
    }
    Ok(())
}

fn describe(o: Outcome) -> String {
    let color = match o.color() {
        Color::Red => "red",
        Color::Black => "black",
        Color::Green => "green",
    };
    let mut parts = vec![format!("{:>2}", o.to_string()), color.to_string()];
    if !o.is_green() {
        parts.push(if o.is_even() { "even" } else { "odd" }.into());
        parts.push(if o.is_low() { "low" } else { "high" }.into());
    }
    if let Some(d) = o.dozen() {
        parts.push(format!("dozen {}", d));
    }
    if let Some(c) = o.column() {
        parts.push(format!("column {}", c));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_output() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_spin_command(Some(12345), 20, &mut a).unwrap();
        handle_spin_command(Some(12345), 20, &mut b).unwrap();
        assert_eq!(a, b);
        let text = String::from_utf8(a).unwrap();
        assert!(text.starts_with("Seed: 12345\n"));
        assert_eq!(text.lines().count(), 21);
    }

    #[test]
    fn describes_derived_properties() {
        assert_eq!(
            describe(Outcome::number(7).unwrap()),
            " 7 red odd low dozen 1 column 1"
        );
        assert_eq!(describe(Outcome::DOUBLE_ZERO), "00 green");
    }
}
