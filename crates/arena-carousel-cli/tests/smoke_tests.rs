//! Smoke tests for the arena-carousel CLI
//!
//! These tests run the built binary and check its output and exit codes.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the arena-carousel binary
fn arena() -> Command {
    let mut cmd = Command::cargo_bin("arena-carousel").expect("arena-carousel binary should exist");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    arena()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    arena()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("quality"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn test_no_args_fails() {
    arena().assert().failure();
}

#[test]
fn test_simulate_help_lists_steps() {
    arena()
        .args(["simulate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("advance:MS"));
}

// ============================================================================
// Quality
// ============================================================================

#[test]
fn test_quality_without_hint() {
    arena()
        .arg("quality")
        .assert()
        .success()
        .stdout("high\n");
}

#[test]
fn test_quality_slow_connection() {
    arena()
        .args(["quality", "--effective-type", "2g"])
        .assert()
        .success()
        .stdout("low\n");
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_default_reel() {
    arena()
        .args(["--color", "never", "catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 slides, high quality"))
        .stdout(predicate::str::contains("/src/assets/reels/reel1_high.mp4"))
        .stdout(predicate::str::contains("/src/assets/gallery-images/img7.webp"));
}

#[test]
fn test_catalog_json_low_quality() {
    let output = arena()
        .args(["catalog", "-e", "3g", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["quality"], "low");
    assert_eq!(value["slides"][1]["source"], "/src/assets/reels/reel2_low.mp4");
}

#[test]
fn test_catalog_empty_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gallery.json");
    fs::write(&path, r#"{"catalog": []}"#).unwrap();

    arena()
        .args(["catalog", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_catalog_missing_config_fails() {
    arena()
        .args(["catalog", "--config", "/nonexistent/gallery.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

// ============================================================================
// Simulate
// ============================================================================

#[test]
fn test_simulate_steps_text() {
    arena()
        .args([
            "--color", "never", "simulate", "--step", "end:0", "--step", "end:1", "--step",
            "advance:3000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 steps"))
        .stdout(predicate::str::contains("advance:3000"))
        .stdout(predicate::str::contains("selected=3"));
}

#[test]
fn test_simulate_script_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.yaml");
    fs::write(&path, "- next\n- next\n- click:2\n- close\n").unwrap();

    let output = arena()
        .args(["simulate", "--format", "json", "--script"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[3]["zoomed_index"], 2);
    assert_eq!(entries[3]["outcome"]["outcome"], "zoomed");
    assert!(entries[4]["zoomed_index"].is_null());
}

#[test]
fn test_simulate_hint_after_mount_keeps_quality() {
    let output = arena()
        .args(["simulate", "-e", "2g", "--step", "hint:4g", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["quality"], "low");
}

#[test]
fn test_simulate_huge_advance_saturates_clock() {
    let output = arena()
        .args([
            "simulate",
            "--format",
            "json",
            "--step",
            "advance:18446744073709551615",
            "--step",
            "advance:1",
            "--step",
            "drag:2",
            "--step",
            "advance:3000",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entries"][2]["at_ms"], u64::MAX);
    assert_eq!(value["entries"][4]["selected_index"], 2);
}

#[test]
fn test_simulate_bad_step_fails() {
    arena()
        .args(["simulate", "--step", "teleport:4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("teleport:4"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    arena()
        .args(["-v", "--color", "never", "simulate", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("carousel mounted"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_auto_color_keeps_piped_logs_plain() {
    arena()
        .args(["-v", "simulate", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("carousel mounted"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}
