use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".kpi-dash").join("config.json")
}

const BINARY_NAME: &str = "kpi-dash";

/// Nothing listens on the discard port, so every request fails fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Reset command should delete an existing config file.
fn reset_config_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();
    assert!(config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset-config")
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("Configuration reset"));

    assert!(!config_path.exists());
}

#[test]
/// Resetting without a config file is not an error.
fn reset_config_without_file_succeeds() {
    let tmp = temp_home_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset-config")
        .env("HOME", tmp.path())
        .assert()
        .success();
}

#[test]
/// Snapshot with unreachable catalogs cannot resolve the selection.
fn snapshot_without_catalogs_reports_missing_data() {
    let tmp = temp_home_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args([
        "snapshot",
        "--metric",
        "revenue",
        "--segment-key",
        "region",
        "--segment-id",
        "us",
        "--api-url",
        UNREACHABLE_API,
    ])
    .env("HOME", tmp.path())
    .assert()
    .failure()
    .stderr(contains("missing data"));
}

#[test]
/// A failed snapshot is reported once, without the debug-formatted error from main.
fn snapshot_failure_is_printed_once() {
    let tmp = temp_home_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args([
        "snapshot",
        "--metric",
        "revenue",
        "--segment-key",
        "region",
        "--segment-id",
        "us",
        "--api-url",
        UNREACHABLE_API,
    ])
    .env("HOME", tmp.path())
    .env_remove("RUST_LOG")
    .assert()
    .code(1)
    .stderr(contains("missing data").count(1))
    .stderr(contains("Error: ").not());
}

#[test]
/// Catalog command degrades to empty catalogs when the API is down.
fn catalog_lists_nothing_when_api_is_down() {
    let tmp = temp_home_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["catalog", "--api-url", UNREACHABLE_API])
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("0 available"))
        .stdout(contains("0 groups available"));
}
