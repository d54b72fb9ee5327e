//! Robot registration and fleet listing tests

mod common;

use common::{finca, log_test_reading, register_test_robot, setup_test_project};
use predicates::prelude::*;

#[test]
fn test_robot_new_registers_robot() {
    let tmp = setup_test_project();

    finca()
        .current_dir(tmp.path())
        .args([
            "robot",
            "new",
            "valley-1",
            "--location",
            "Greenhouse A",
            "--lat",
            "9.93",
            "--lon",
            "-84.08",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered robot"))
        .stdout(predicate::str::contains("valley-1"));
}

#[test]
fn test_robot_new_rejects_duplicate_name() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args(["robot", "new", "valley-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_robot_new_rejects_bad_status() {
    let tmp = setup_test_project();

    finca()
        .current_dir(tmp.path())
        .args(["robot", "new", "valley-1", "--status", "exploded"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown robot status"));
}

#[test]
fn test_robot_list_empty() {
    let tmp = setup_test_project();

    finca()
        .current_dir(tmp.path())
        .args(["robot", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No robots registered"));
}

#[test]
fn test_robot_list_shows_aggregates() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    register_test_robot(&tmp, "ridge-2");
    log_test_reading(&tmp, "valley-1", "22", "55");
    log_test_reading(&tmp, "valley-1", "24", "60");

    finca()
        .current_dir(tmp.path())
        .args(["robot", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valley-1"))
        .stdout(predicate::str::contains("ridge-2"))
        .stdout(predicate::str::contains("23.0°C"))
        .stdout(predicate::str::contains("2 robot(s)"));
}

#[test]
fn test_robot_list_count() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    finca()
        .current_dir(tmp.path())
        .args(["robot", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn test_robot_list_json_format() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");

    let output = finca()
        .current_dir(tmp.path())
        .args(["robot", "list", "--format", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(parsed[0]["name"], "valley-1");
    assert_eq!(parsed[0]["status"], "active");
}

#[test]
fn test_robot_show_by_name() {
    let tmp = setup_test_project();
    register_test_robot(&tmp, "valley-1");
    log_test_reading(&tmp, "valley-1", "22", "55");

    finca()
        .current_dir(tmp.path())
        .args(["robot", "show", "valley-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valley-1"))
        .stdout(predicate::str::contains("ROB-"))
        .stdout(predicate::str::contains("Temperature: 22.0°C"));
}

#[test]
fn test_robot_show_unknown_fails() {
    let tmp = setup_test_project();

    finca()
        .current_dir(tmp.path())
        .args(["robot", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No robot found"));
}
