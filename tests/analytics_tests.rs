//! Analyze, stats, and advisory command tests

mod common;

use common::{finca, log_test_reading, register_test_robot, setup_test_project};
use predicates::prelude::*;

#[test]
fn test_analyze_reports_health_and_trends() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "25", "55");

    finca()
        .current_dir(tmp.path())
        .args(["analyze", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Health score"))
        .stdout(predicate::str::contains("Trends"));
}

#[test]
fn test_analyze_flags_heat_stress() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "36", "55");

    finca()
        .current_dir(tmp.path())
        .args(["analyze", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("heat stress"));
}

#[test]
fn test_analyze_without_readings_fails() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args(["analyze", "valley-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readings recorded"));
}

#[test]
fn test_analyze_json_format() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    // Optimal on all fronts: 25°C in 20-30, 55% in 40-70
    log_test_reading(&tmp, "valley-1", "25", "55");

    let output = finca()
        .current_dir(tmp.path())
        .args(["analyze", "valley-1", "--format", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(parsed["health_score"], 25);
    assert_eq!(parsed["optimality_score"], 25);
    assert_eq!(parsed["trends"]["temperature"], "stable");
    assert!(parsed["alerts"].as_array().unwrap().is_empty());
}

#[test]
fn test_stats_reports_averages_and_ranges() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "20", "50");
    log_test_reading(&tmp, "valley-1", "24", "60");

    finca()
        .current_dir(tmp.path())
        .args(["stats", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("temperature"))
        .stdout(predicate::str::contains("22.0"))
        .stdout(predicate::str::contains("20.0"))
        .stdout(predicate::str::contains("24.0"));
}

#[test]
fn test_stats_flags_anomalies() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    for _ in 0..5 {
        log_test_reading(&tmp, "valley-1", "20", "50");
    }
    // 30 deviates well past 20% from the window mean
    log_test_reading(&tmp, "valley-1", "30", "50");

    finca()
        .current_dir(tmp.path())
        .args(["stats", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Anomalies (1)"));
}

#[test]
fn test_stats_empty_window() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args(["stats", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No readings"));
}

#[test]
fn test_advise_produces_field_report() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "25", "55");

    finca()
        .current_dir(tmp.path())
        .args(["advise", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field report"))
        .stdout(predicate::str::contains("Observations"))
        .stdout(predicate::str::contains("Monitoring"));
}

#[test]
fn test_advise_flags_critical_heat() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "37", "55");

    finca()
        .current_dir(tmp.path())
        .args(["advise", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alerts"));
}

#[test]
fn test_advise_yaml_format() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "25", "55");

    finca()
        .current_dir(tmp.path())
        .args(["advise", "valley-1", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("observations:"))
        .stdout(predicate::str::contains("monitoring:"));
}
