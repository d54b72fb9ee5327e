//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a finca command
pub fn finca() -> Command {
    Command::new(cargo::cargo_bin!("finca"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    finca()
        .current_dir(tmp.path())
        .args(["init", "testfarm", "--author", "tester"])
        .assert()
        .success();
    tmp
}

/// Helper to register a robot
pub fn register_test_robot(tmp: &TempDir, name: &str) {
    finca()
        .current_dir(tmp.path())
        .args(["robot", "new", name])
        .assert()
        .success();
}

/// Helper to log a reading with temperature and humidity
pub fn log_test_reading(tmp: &TempDir, robot: &str, temperature: &str, humidity: &str) {
    finca()
        .current_dir(tmp.path())
        .args([
            "reading",
            "log",
            robot,
            "--temperature",
            temperature,
            "--humidity",
            humidity,
            "--pressure",
            "1010",
        ])
        .assert()
        .success();
}
