//! Integration tests for config load failures falling back to defaults

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn run_in(project: &TempDir, home: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_textbridge"))
        .args(args)
        .env("HOME", home.path())
        .current_dir(project.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute textbridge")
}

fn write_project_config(project: &TempDir, contents: &str) {
    let dir = project.path().join(".textbridge");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_invalid_toml_warns_and_uses_defaults() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project_config(&project, "[accessibility\nmessaging_timeout_ms = ");

    let output = run_in(&project, &home, &["get"]);

    assert!(
        output.status.success(),
        "Invalid config must not abort the command. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected config warning, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Using defaults"),
        "Expected fallback notice, got: {}",
        stderr
    );
}

#[test]
fn test_out_of_range_timeout_warns() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project_config(&project, "[accessibility]\nmessaging_timeout_ms = 0\n");

    let output = run_in(&project, &home, &["check"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected config warning, got: {}",
        stderr
    );
}

#[test]
fn test_valid_config_has_no_warning() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_project_config(&project, "[accessibility]\nmessaging_timeout_ms = 500\n");

    let output = run_in(&project, &home, &["get"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning"),
        "Valid config should not warn, got: {}",
        stderr
    );
}

#[test]
fn test_missing_config_has_no_warning() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    let output = run_in(&project, &home, &["check"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning"),
        "Missing config should not warn, got: {}",
        stderr
    );
}
