//! Reading ingest and history window tests

mod common;

use common::{finca, log_test_reading, register_test_robot, setup_test_project};
use predicates::prelude::*;

#[test]
fn test_reading_log_records_reading() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args([
            "reading",
            "log",
            "valley-1",
            "--temperature",
            "23.5",
            "--humidity",
            "58",
            "--co2",
            "450",
            "--lux",
            "800",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged reading for"))
        .stdout(predicate::str::contains("valley-1"));
}

#[test]
fn test_reading_log_unknown_robot_fails() {
    let tmp = setup_test_project();

    finca()
        .current_dir(tmp.path())
        .args(["reading", "log", "ghost", "--temperature", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No robot found"));
}

#[test]
fn test_reading_log_discards_out_of_range_values() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    // 120°C is a sensor fault; the reading is kept but the value is dropped
    finca()
        .current_dir(tmp.path())
        .args([
            "reading",
            "log",
            "valley-1",
            "--temperature",
            "120",
            "--humidity",
            "55",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("outside the plausible range"));

    finca()
        .current_dir(tmp.path())
        .args(["robot", "show", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Humidity: 55.0%"))
        .stdout(predicate::str::contains("Temperature").not());
}

#[test]
fn test_reading_log_rejects_bad_timestamp() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args([
            "reading",
            "log",
            "valley-1",
            "--temperature",
            "20",
            "--timestamp",
            "yesterday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn test_reading_list_shows_window() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "21", "50");
    log_test_reading(&tmp, "valley-1", "23", "52");

    finca()
        .current_dir(tmp.path())
        .args(["reading", "list", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("21.0"))
        .stdout(predicate::str::contains("23.0"))
        .stdout(predicate::str::contains("2 reading(s)"));
}

#[test]
fn test_reading_list_empty_window() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args(["reading", "list", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No readings"));
}

#[test]
fn test_reading_list_excludes_old_readings() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    // Two days old; outside the default 24h window
    finca()
        .current_dir(tmp.path())
        .args([
            "reading",
            "log",
            "valley-1",
            "--temperature",
            "20",
            "--timestamp",
            "2020-01-01T12:00:00Z",
        ])
        .assert()
        .success();

    finca()
        .current_dir(tmp.path())
        .args(["reading", "list", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No readings"));
}

#[test]
fn test_reading_list_json_format() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "22", "55");

    let output = finca()
        .current_dir(tmp.path())
        .args(["reading", "list", "valley-1", "--format", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(parsed[0]["temperature_c"], 22.0);
    assert_eq!(parsed[0]["humidity_pct"], 55.0);
    // Missing sensors flatten to the zero sentinel
    assert_eq!(parsed[0]["lux"], 0.0);
}

#[test]
fn test_export_writes_csv() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "22", "55");

    let out = tmp.path().join("window.csv");
    finca()
        .current_dir(tmp.path())
        .args(["export", "valley-1", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 reading(s)"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("timestamp,"));
    assert!(content.contains("22.0") || content.contains(",22,"));
}
