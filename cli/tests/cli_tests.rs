//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("warnkit").expect("binary should exist");
    cmd.env_remove("WARNKIT_KB_ROOT");
    cmd
}

fn sample_warnings() -> String {
    serde_json::json!([
        { "kind": "base", "message": "1. Please stop doing this." },
        { "kind": "base", "message": "2. Please stop doing this." },
        { "kind": "base", "message": "3. Please stop doing this." },
        { "kind": "deprecation", "featureName": "fancyFetch" },
        { "kind": "deprecation", "featureName": "fancyPut" },
        { "kind": "stability", "featureName": "fancyPatch", "featureType": "function" },
        { "kind": "stability", "featureName": "fancyDelete", "featureType": "function" }
    ])
    .to_string()
}

fn write_sample(dir: &TempDir) -> String {
    let input = dir.path().join("warnings.json");
    fs::write(&input, sample_warnings()).unwrap();
    input.to_str().unwrap().to_string()
}

// ── Compose ─────────────────────────────────────────────────────────────────

#[test]
fn test_compose_from_fields() {
    cmd()
        .args(["compose", "deprecation", "--feature-name", "api.query"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"DeprecationWarning [0x22]: The feature "api.query" has been deprecated."#,
        ))
        .stdout(predicate::str::contains("help: https://kb.example.com/exceptions/0x22?message="));
}

#[test]
fn test_compose_default_message() {
    cmd()
        .args(["compose", "pending-deprecation"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PendingDeprecationWarning [0x21]: A feature is pending deprecation.",
        ));
}

#[test]
fn test_compose_literal_message_wins() {
    cmd()
        .args(["compose", "stability", "-m", "Do not ship this."])
        .args(["--feature-name", "ignored"])
        .assert()
        .success()
        .stdout(predicate::str::contains("StabilityWarning [0x23]: Do not ship this."))
        .stdout(predicate::str::contains("&data="));
}

#[test]
fn test_compose_json_with_data() {
    let output = cmd()
        .args(["compose", "deprecation", "--feature-type", "function"])
        .args(["--alternative-feature-name", "api.search"])
        .args(["--data", "since=\"2.0\"", "--data", "removal=3"])
        .args(["--format", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &reports[0];
    assert_eq!(
        report["message"],
        r#"A function has been deprecated. Instead use "api.search"."#
    );
    assert_eq!(report["code"], 34);
    assert_eq!(report["data"]["since"], "2.0");
    assert_eq!(report["data"]["removal"], 3);
}

#[test]
fn test_compose_kb_root_flag() {
    cmd()
        .args(["compose", "base", "--kb-root", "https://kb.internal/w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("help: https://kb.internal/w/0x20?message="));
}

#[test]
fn test_compose_kb_root_env() {
    cmd()
        .env("WARNKIT_KB_ROOT", "https://env.kb")
        .args(["compose", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("help: https://env.kb/0x20?"));
}

#[test]
fn test_compose_rejects_malformed_data() {
    cmd()
        .args(["compose", "base", "--data", "no-equals-sign"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_compose_rejects_empty_message() {
    cmd()
        .args(["compose", "base", "-m", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compose warning"))
        .stderr(predicate::str::contains("must not be empty"));
}

// ── Report ──────────────────────────────────────────────────────────────────

#[test]
fn test_report_all() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let output = cmd()
        .args(["report", &input, "--format", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let reports: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 7);
}

#[test]
fn test_report_filter_by_message() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let output = cmd()
        .args(["report", &input, "--contains", "fancy", "--format", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let reports: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 4);
}

#[test]
fn test_report_filter_by_kind() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let output = cmd()
        .args(["report", &input, "--kind", "deprecation", "--format", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let reports: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["name"] == "DeprecationWarning"));
}

#[test]
fn test_report_group_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("groups.txt");

    cmd()
        .args(["report", &input, "--group"])
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("output file should exist");
    assert!(content.contains("Warning: 3"));
    assert!(content.contains("DeprecationWarning: 2"));
    assert!(content.contains("StabilityWarning: 2"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_report_group_and_kind_conflict() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    cmd()
        .args(["report", &input, "--group", "--kind", "base"])
        .assert()
        .failure();
}

// ── Invalid Input ───────────────────────────────────────────────────────────

#[test]
fn test_invalid_input() {
    cmd()
        .args(["report", "/nonexistent/path/warnings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_invalid_spec() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, r#"[{"kind": "base", "message": ""}]"#).unwrap();

    cmd()
        .args(["report", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load warnings"));
}

// ── Help Output ─────────────────────────────────────────────────────────────

#[test]
fn test_help_output() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compose"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_compose_help() {
    cmd()
        .args(["compose", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--feature-name"))
        .stdout(predicate::str::contains("--alternative-feature-name"))
        .stdout(predicate::str::contains("--data"));
}
