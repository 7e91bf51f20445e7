//! Tests for the `osm-shaper` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("minneapolis_sample.osm")
}

fn shaper() -> Command {
    Command::cargo_bin("osm-shaper").expect("binary should be built")
}

#[test]
fn test_cli_process_writes_output() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.json");

    shaper()
        .arg("process")
        .arg(fixture_path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents written"))
        .stdout(predicate::str::contains("Saved to:"));

    let content = fs::read_to_string(&output).expect("Failed to read output");
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_cli_process_with_limit() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.json");

    shaper()
        .args(["process", "--limit", "2"])
        .arg(fixture_path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("Failed to read output");
    // bounds is rejected, the first node is accepted
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_cli_process_missing_input() {
    shaper()
        .args(["process", "does-not-exist.osm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

#[test]
fn test_cli_process_missing_output_dir() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    shaper()
        .arg("process")
        .arg(fixture_path())
        .arg("--output")
        .arg(dir.path().join("nope").join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output directory does not exist"));
}

#[test]
fn test_cli_audit() {
    shaper()
        .arg("audit")
        .arg(fixture_path())
        .args(["--top", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Street endings"))
        .stdout(predicate::str::contains("In region: 1"));
}
