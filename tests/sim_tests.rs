//! Weather simulation command tests

mod common;

use common::finca;
use predicates::prelude::*;

// `sim` needs no project; it is a pure computation

#[test]
fn test_sim_default_run() {
    finca()
        .args(["sim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulating"))
        .stdout(predicate::str::contains("coffee"))
        .stdout(predicate::str::contains("Expected yield"));
}

#[test]
fn test_sim_is_deterministic_for_fixed_start_date() {
    let run = || {
        finca()
            .args([
                "sim",
                "--crop",
                "maize",
                "--region",
                "central",
                "--start-date",
                "2025-03-10",
                "--days",
                "14",
            ])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_sim_day_count() {
    finca()
        .args(["sim", "--days", "10", "--start-date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-10"))
        .stdout(predicate::str::contains("2025-03-19"))
        .stdout(predicate::str::contains("2025-03-20").not());
}

#[test]
fn test_sim_rejects_out_of_range_days() {
    finca().args(["sim", "--days", "5"]).assert().failure();
    finca().args(["sim", "--days", "60"]).assert().failure();
}

#[test]
fn test_sim_drought_recommendations() {
    finca()
        .args([
            "sim",
            "--scenario",
            "drought",
            "--temp-adjust",
            "10",
            "--start-date",
            "2025-03-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mulching"));
}

#[test]
fn test_sim_json_format() {
    let output = finca()
        .args([
            "sim",
            "--crop",
            "maize",
            "--start-date",
            "2025-03-10",
            "--days",
            "7",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(parsed["days"].as_array().unwrap().len(), 7);
    assert!(parsed["average_yield"].as_f64().unwrap() > 0.0);
    assert!(parsed["classification"].is_string());
}

#[test]
fn test_sim_csv_format() {
    finca()
        .args([
            "sim",
            "--start-date",
            "2025-03-10",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "date,temperature,precipitation,yield_pct",
        ));
}
