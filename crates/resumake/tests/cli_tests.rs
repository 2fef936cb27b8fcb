//! Integration tests for CLI infrastructure

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use resumake_testkit::temp_dir_in_workspace;
use std::process::Command;

#[test]
fn test_cli_version_flag() {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("resumake"));
}

#[test]
fn test_cli_help_flag() {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("--no-pdf"));
}

#[test]
fn test_cli_unknown_flag_rejected() {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--frobnicate"));
}

#[test]
fn test_missing_config_file_reported() {
    let temp = temp_dir_in_workspace();

    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .current_dir(temp.path())
        .args(["--config", "nope.toml", "--no-pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file 'nope.toml' not found"));
}

#[test]
fn test_invalid_config_file_reported() {
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join("resumake.toml"), "[output\n").unwrap();

    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .current_dir(temp.path())
        .arg("--no-pdf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_watch_requires_data_file() {
    let temp = temp_dir_in_workspace();

    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
        .current_dir(temp.path())
        .arg("watch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resume_data.yaml"));
}
