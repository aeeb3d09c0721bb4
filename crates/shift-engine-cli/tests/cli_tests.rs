//! Integration tests for the `shift-check` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the resolve and check
//! subcommands through the actual binary, including stdin/stdout piping, file
//! I/O, the roster environment variable and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the roster.json fixture.
fn roster_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roster.json")
}

/// Helper: path to the request.json fixture.
fn request_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/request.json")
}

fn shift_check() -> Command {
    let mut cmd = Command::cargo_bin("shift-check").unwrap();
    cmd.env_remove("SHIFT_CHECK_ROSTER").env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolve subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_file_to_stdout() {
    let output = shift_check()
        .args(["resolve", "--roster", roster_path(), "-i", request_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_requested"], 3);
    assert_eq!(report["available_count"], 1);
    assert_eq!(report["unavailable_count"], 2);
    assert_eq!(report["all_available"], false);
    assert_eq!(report["reports"][0]["status"], "schedule-conflict");
    assert_eq!(report["reports"][0]["label"], "Harbour Gala Dinner");
    assert_eq!(report["reports"][1]["status"], "available");
    assert_eq!(report["reports"][2]["status"], "not-opted-in");
}

#[test]
fn resolve_stdin_with_roster_from_env() {
    let input = r#"{
        "window": {"date": "2025-01-10", "start": "09:00", "end": "12:00"},
        "staff_ids": ["A", "B"]
    }"#;

    shift_check()
        .env("SHIFT_CHECK_ROSTER", roster_path())
        .arg("resolve")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"all_available\": true"));
}

#[test]
fn resolve_file_to_file() {
    let output_path = std::env::temp_dir().join("shift-check-test-resolve-output.json");
    let _ = std::fs::remove_file(&output_path);

    shift_check()
        .args(["resolve", "--roster", roster_path(), "-i", request_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["total_requested"], 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn resolve_text_format() {
    shift_check()
        .args([
            "resolve",
            "--roster",
            roster_path(),
            "-i",
            request_path(),
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A: unavailable (schedule-conflict with 'Harbour Gala Dinner' 2025-01-10 18:00-20:00",
        ))
        .stdout(predicate::str::contains("B: available"))
        .stdout(predicate::str::contains("C: unavailable (not-opted-in)"))
        .stdout(predicate::str::contains("1/3 available"));
}

#[test]
fn resolve_lists_unknown_staff() {
    let input = r#"{
        "window": {"date": "2025-01-10", "start": "09:00", "end": "12:00"},
        "staff_ids": ["B", "ghost"]
    }"#;

    let output = shift_check()
        .args(["resolve", "--roster", roster_path()])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["not_found"], serde_json::json!(["ghost"]));
    assert_eq!(report["total_requested"], 1);
}

#[test]
fn resolve_only_unknown_staff_fails() {
    let input = r#"{
        "window": {"date": "2025-01-10", "start": "09:00", "end": "12:00"},
        "staff_ids": ["ghost"]
    }"#;

    shift_check()
        .args(["resolve", "--roster", roster_path()])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Staff member not found: ghost"));
}

#[test]
fn resolve_missing_window_field_fails() {
    let input = r#"{"window":{"date":"2025-01-10","start":"09:00"},"staff_ids":["A"]}"#;

    shift_check()
        .args(["resolve", "--roster", roster_path()])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request: end"));
}

#[test]
fn resolve_invalid_json_fails() {
    shift_check()
        .args(["resolve", "--roster", roster_path()])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability request"));
}

#[test]
fn resolve_missing_roster_fails() {
    shift_check()
        .args([
            "resolve",
            "--roster",
            "/nonexistent/roster.json",
            "-i",
            request_path(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read roster"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_overnight_shift_conflicts_next_morning() {
    shift_check()
        .args([
            "check",
            "--roster",
            roster_path(),
            "--staff",
            "B",
            "--date",
            "2025-01-10",
            "--start",
            "22:00",
            "--end",
            "02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"schedule-conflict\""))
        .stdout(predicate::str::contains("Sunrise Yoga Retreat"));
}

#[test]
fn check_adjacent_shift_is_available() {
    shift_check()
        .args([
            "check",
            "--roster",
            roster_path(),
            "--staff",
            "A",
            "--date",
            "2025-01-10",
            "--start",
            "20:00",
            "--end",
            "23:00",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("A: available"));
}

#[test]
fn check_unknown_staff_fails() {
    shift_check()
        .args([
            "check",
            "--roster",
            roster_path(),
            "--staff",
            "ghost",
            "--date",
            "2025-01-10",
            "--start",
            "09:00",
            "--end",
            "12:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Staff member not found: ghost"));
}

#[test]
fn check_malformed_time_fails() {
    shift_check()
        .args([
            "check",
            "--roster",
            roster_path(),
            "--staff",
            "A",
            "--date",
            "2025-01-10",
            "--start",
            "9am",
            "--end",
            "12:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request: start"));
}

#[test]
fn no_subcommand_shows_usage() {
    shift_check()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
