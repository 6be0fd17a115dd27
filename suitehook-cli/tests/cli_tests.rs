//! End-to-end tests for the `suitehook` binary.
//!
//! Each test points `--config` at a temp directory so the developer's own
//! suitehook.toml never leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn suitehook(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_suitehook"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_run_all_samples_with_missing_config_succeeds() {
    // Given: no config file
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    // When: running every built-in suite
    let output = suitehook(&config, &["run", "--output", "json"]);

    // Then: defaults are used and every suite passes
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json = stdout_json(&output);
    let suites = json["suites"].as_array().expect("suites array");
    assert_eq!(suites.len(), 3);
    assert_eq!(suites[0]["suite"], "before-all-sample");
    assert_eq!(suites[0]["cases"][0]["name"], "aTest1");
    assert_eq!(suites[0]["cases"][1]["name"], "aTest2");
}

#[test]
fn test_run_injection_sample_records_lifecycle_timeline() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    let output = suitehook(
        &config,
        &["run", "property-injection-sample", "--output", "json"],
    );

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    let suite = &json["suites"][0];
    assert_eq!(suite["cases"][0]["outcome"]["status"], "passed");
    let events: Vec<&str> = suite["timeline"]
        .as_array()
        .expect("timeline array")
        .iter()
        .filter_map(|e| e["event"].as_str())
        .collect();
    assert_eq!(
        events,
        vec![
            "setup_started",
            "setup_finished",
            "case_started",
            "case_finished",
            "teardown_started",
            "teardown_finished"
        ]
    );
}

#[test]
fn test_run_with_seed_reports_random_order() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    let output = suitehook(
        &config,
        &["run", "feature-tour", "--seed", "42", "--output", "json"],
    );

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["suites"][0]["order"], "random");
    assert_eq!(json["suites"][0]["seed"], 42);
}

#[test]
fn test_run_unknown_suite_exits_with_general_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    let output = suitehook(&config, &["run", "ghost"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("suite not found: ghost"));
}

#[test]
fn test_run_with_invalid_base_property_exits_with_config_error() {
    // Given: a base property whose key is rejected before any suite runs
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");
    fs::write(&config, "[properties]\n\"bad key\" = \"x\"\n").expect("should write config");

    let output = suitehook(&config, &["run"]);

    assert_eq!(output.status.code(), Some(2), "config errors map to exit code 2");
}

#[test]
fn test_config_validate_malformed_file_exits_with_config_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[runner\norder = \"declared\"\n").expect("should write config");

    let output = suitehook(&config, &["config", "validate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("INVALID"));
}

#[test]
fn test_config_validate_valid_file_as_json() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");
    fs::write(
        &config,
        "[general]\nlog_level = \"warn\"\n\n[runner]\norder = \"reversed\"\n",
    )
    .expect("should write config");

    let output = suitehook(&config, &["config", "validate", "--output", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert!(json["errors"].as_array().expect("errors array").is_empty());
}

#[test]
fn test_config_show_runner_section_reflects_file() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");
    fs::write(&config, "[runner]\norder = \"reversed\"\n").expect("should write config");

    let output = suitehook(&config, &["config", "show", "--section", "runner"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("order = \"reversed\""), "stdout: {stdout}");
}

#[test]
fn test_list_outputs_registered_suites() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    let output = suitehook(&config, &["list", "--output", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    let names: Vec<&str> = json["suites"]
        .as_array()
        .expect("suites array")
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["before-all-sample", "property-injection-sample", "feature-tour"]
    );
}

#[test]
fn test_config_show_json_includes_configuration() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");
    fs::write(&config, "[runner]\norder = \"reversed\"\n").expect("should write config");

    let output = suitehook(
        &config,
        &["config", "show", "--section", "runner", "--output", "json"],
    );

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["section"], "runner");
    assert_eq!(json["config"]["order"], "reversed");
    assert_eq!(json["config"]["teardown_after_failed_setup"], true);
}

#[test]
fn test_run_duplicate_suite_names_in_parallel_renders_once() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("suitehook.toml");

    let output = suitehook(
        &config,
        &[
            "run",
            "before-all-sample",
            "before-all-sample",
            "--parallel",
            "--output",
            "json",
        ],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json = stdout_json(&output);
    assert_eq!(json["suites"].as_array().expect("suites array").len(), 1);
}
