#![allow(deprecated)] // cargo_bin deprecation - still works fine

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNOPTIMIZED: &str = "FROM python:latest\nWORKDIR /app\nRUN pip install flask\nCMD [\"python\", \"app.py\"]\n";
const CLEAN: &str = "FROM python:3.9-slim\nRUN pip install flask && pip cache purge\nUSER appuser\n";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dockerfile-linter").expect("binary should exist");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_dockerfile(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("Dockerfile");
    fs::write(&path, content).unwrap();
    path
}

fn json_issues(output: &[u8]) -> Vec<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_slice(output).expect("stdout should be JSON");
    value["issues"].as_array().expect("issues array").clone()
}

#[test]
fn text_report_lists_findings() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile Analysis Report"))
        .stdout(predicate::str::contains("Avoid using 'latest' tag for base images."))
        .stdout(predicate::str::contains("No non-root user specified."))
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn clean_dockerfile_reports_all_checks_passed() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, CLEAN);

    cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("Well done!"));
}

#[test]
fn json_output_has_issue_triples_in_check_order() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);

    let output = cmd()
        .arg(&path)
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let issues = json_issues(&output.stdout);
    let severities: Vec<&str> = issues.iter().map(|i| i[1].as_str().unwrap()).collect();
    assert_eq!(severities, vec!["WARN", "INFO", "FAIL", "WARN"]);
    assert_eq!(
        issues[1][0],
        "Consider using a smaller base image instead of python:latest."
    );
}

#[test]
fn json_output_for_clean_file_is_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, CLEAN);

    let output = cmd().arg(&path).args(["--output", "json"]).output().unwrap();
    assert!(output.status.success());
    assert!(json_issues(&output.stdout).is_empty());
}

#[test]
fn ignore_accepts_multiple_names() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);

    let output = cmd()
        .arg(&path)
        .args(["--output", "json", "--ignore", "Base Image Check", "Optimized RUN Check"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let issues = json_issues(&output.stdout);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "No non-root user specified.");
}

#[test]
fn unknown_ignore_name_is_inert() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);

    let output = cmd()
        .arg(&path)
        .args(["--output", "json", "--ignore", "base image check"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_issues(&output.stdout).len(), 4);
}

#[test]
fn missing_dockerfile_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Dockerfile");

    cmd()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "Error: Dockerfile not found at '{}'",
            path.display()
        )));
}

#[test]
fn unparseable_dockerfile_reports_unexpected_error() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, "RUN echo no base image\n");

    cmd()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("An unexpected error occurred: "))
        .stdout(predicate::str::contains("No FROM instruction"));
}

#[test]
fn invalid_output_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, CLEAN);

    cmd()
        .arg(&path)
        .args(["--output", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_positional_is_usage_error() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn config_beside_dockerfile_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);
    fs::write(
        dir.path().join(".dockerfile-linter.toml"),
        "output = \"json\"\nignore = [\"Non-Root User Check\"]\n",
    )
    .unwrap();

    let output = cmd().arg(&path).output().unwrap();
    assert!(output.status.success());
    let issues = json_issues(&output.stdout);
    assert_eq!(issues.len(), 3);
    assert!(issues.iter().all(|i| i[0] != "No non-root user specified."));
}

#[test]
fn cli_output_overrides_config() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, CLEAN);
    fs::write(dir.path().join(".dockerfile-linter.toml"), "output = \"json\"\n").unwrap();

    cmd()
        .arg(&path)
        .args(["--output", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, CLEAN);

    cmd()
        .arg(&path)
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("An unexpected error occurred: Failed to load config"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = write_dockerfile(&dir, UNOPTIMIZED);

    let output = cmd()
        .arg(&path)
        .args(["-v", "--output", "json", "--ignore", "Base Image Check"])
        .output()
        .unwrap();
    assert!(output.status.success());
    json_issues(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping ignored check"), "stderr: {}", stderr);
}

#[test]
fn directory_argument_lints_contained_dockerfile() {
    let dir = TempDir::new().unwrap();
    write_dockerfile(&dir, UNOPTIMIZED);

    let output = cmd()
        .arg(dir.path())
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_issues(&output.stdout).len(), 4);
}

#[test]
fn directory_without_dockerfile_reports_given_path() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "Error: Dockerfile not found at '{}'",
            dir.path().display()
        )));
}

#[test]
fn read_failure_prints_cause_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.Dockerfile");
    fs::write(&path, [0x46, 0x52, 0x4f, 0x4d, 0x20, 0xff, 0xfe, 0x0a]).unwrap();

    let output = cmd().arg(&path).output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("An unexpected error occurred: Failed to read"), "stdout: {}", stdout);
    assert_eq!(stdout.matches("valid UTF-8").count(), 1, "stdout: {}", stdout);
}
