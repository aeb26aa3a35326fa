// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end checks for the harness binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn turnstile() -> Command {
    Command::cargo_bin("turnstile").expect("harness binary builds")
}

#[test]
fn missing_arguments_exit_nonzero_with_usage() {
    turnstile()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn partial_arguments_exit_nonzero_with_usage() {
    turnstile()
        .args(["1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_scenario_is_rejected() {
    turnstile()
        .args(["3", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn releaser_count_may_not_exceed_unit_count() {
    turnstile()
        .args(["1", "3", "2", "--window", "50ms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("releaser count"));
}

#[test]
fn stress_prints_one_labeled_row_per_design() {
    let assert = turnstile()
        .args(["1", "1", "3", "--window", "100ms"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    for label in ["slot", "coordinator", "chained"] {
        let row = stderr
            .lines()
            .find(|line| line.starts_with(label))
            .unwrap_or_else(|| panic!("missing stress row for {label}"));
        // Label plus one count per unit.
        assert_eq!(row.split('\t').count(), 4, "bad row: {row}");
    }
}

#[test]
fn fairness_prints_a_resumption_line_per_acquirer() {
    let assert = turnstile().args(["2", "0", "2"]).assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for label in ["slot", "coordinator", "chained"] {
        assert!(stdout.lines().any(|line| line == label));
    }
    assert_eq!(stdout.matches("unblocked: ").count(), 6);
}
