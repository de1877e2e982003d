//! Integration tests for CLI argument handling
//!
//! Exercises the compiled binary's argument surface without touching the
//! network or a database.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_covidash"))
        .args(args)
        .output()
        .expect("Failed to execute covidash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("covidash"), "Help should mention covidash");
    assert!(stdout.contains("import"), "Help should list the import subcommand");
    assert!(stdout.contains("serve"), "Help should list the serve subcommand");
}

#[test]
fn test_serve_help_lists_port_flag() {
    let output = run_cli(&["serve", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--port"), "serve help should list --port");
    assert!(stdout.contains("--db"), "serve help should list --db");
}

#[test]
fn test_missing_subcommand_prints_usage_and_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success(), "Expected bare invocation to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage") || stderr.contains("usage"),
        "Should print usage: {stderr}"
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["frobnicate"]);
    assert!(!output.status.success());
}
