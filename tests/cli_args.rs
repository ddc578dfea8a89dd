//! Integration tests for CLI argument handling
//!
//! Runs the built binary: flag validation and the one-shot mode against an
//! origin nothing listens on.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_resultboard"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute resultboard")
}

/// Port 9 (discard) is closed on test machines, so connections are refused
const DEAD_ORIGIN: &str = "http://127.0.0.1:9";

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resultboard"), "Help should mention resultboard");
    assert!(stdout.contains("--origin"), "Help should mention --origin flag");
    assert!(stdout.contains("--once"), "Help should mention --once flag");
}

#[test]
fn test_invalid_origin_prints_error_and_exits() {
    let output = run_cli(&["--origin", "ftp://results.example", "--once"]);
    assert!(!output.status.success(), "Expected invalid origin to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid origin"),
        "Should print error message about invalid origin: {}",
        stderr
    );
}

#[test]
fn test_zero_timeout_is_rejected() {
    let output = run_cli(&["--timeout", "0", "--once"]);
    assert!(!output.status.success(), "Expected a zero timeout to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout"), "Should explain the timeout: {}", stderr);
}

#[test]
fn test_json_without_once_is_rejected() {
    let output = run_cli(&["--json"]);
    assert!(!output.status.success(), "Expected --json alone to fail");
}

#[test]
fn test_once_against_dead_origin_prints_simulated_board() {
    let output = run_cli(&["--origin", DEAD_ORIGIN, "--once", "--no-delay"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DESAWAR"), "Board should list catalog games");
    assert!(stdout.contains("IST"), "Board should carry an IST stamp");
}

#[test]
fn test_once_json_is_valid_and_flags_simulation() {
    let output = run_cli(&["--origin", DEAD_ORIGIN, "--once", "--no-delay", "--json"]);
    assert!(output.status.success());

    let board: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(board["rows"].as_array().map(Vec::len), Some(79));
    assert_eq!(board["results_source"], "Simulated");
    assert_eq!(board["chart_source"], "Simulated");
    assert!(board["last_updated"]["datetime"]
        .as_str()
        .is_some_and(|stamp| stamp.ends_with('Z')));
}

#[test]
fn test_missing_page_file_fails() {
    let output = run_cli(&["--once", "--page", "/nonexistent/board.html"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}
