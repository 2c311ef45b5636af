//! Integration tests for the nomen CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn nomen_cmd() -> Command {
    Command::cargo_bin("nomen").unwrap()
}

fn create_type_model() -> &'static str {
    r#"
types:
  - name: App\Entity\OrderEntity
  - name: App\Io\ChannelInterface
    kind: interface
  - name: App\Io\FileChannel
    implements: [App\Io\ChannelInterface]
"#
}

#[test]
fn test_cli_help() {
    nomen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("candidates"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn test_cli_version() {
    nomen_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_candidates_without_type_model() {
    nomen_cmd()
        .args(["candidates", "App\\Entity\\OrderEntity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orderEntity"))
        .stdout(predicate::str::contains("order"));
}

#[test]
fn test_candidates_with_type_model_lists_interfaces() {
    let temp_dir = tempdir().unwrap();
    let types_path = temp_dir.path().join("types.yml");
    fs::write(&types_path, create_type_model()).unwrap();

    nomen_cmd()
        .args(["candidates", "?App\\Io\\ChannelInterface", "--types"])
        .arg(&types_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("channel"))
        .stdout(predicate::str::contains("ChannelInterface"));
}

#[test]
fn test_candidates_for_scalar_type() {
    nomen_cmd()
        .args(["candidates", "int|null"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No naming constraint"));
}

#[test]
fn test_candidates_rejects_malformed_type() {
    nomen_cmd()
        .args(["candidates", "array<"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_candidates_rejects_excessive_nesting() {
    let expression = format!("{}Foo{}", "(".repeat(10_000), ")".repeat(10_000));
    nomen_cmd()
        .arg("candidates")
        .arg(&expression)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nested too deeply"));
}

#[test]
fn test_check_accepts_matching_name() {
    nomen_cmd()
        .args(["check", "$activeOrder", "App\\Entity\\OrderEntity"])
        .assert()
        .success();
}

#[test]
fn test_check_reports_mismatch_with_exit_code() {
    nomen_cmd()
        .args(["check", "item", "App\\Entity\\OrderEntity"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Allowed base names: order, orderEntity."))
        .stdout(predicate::str::contains("naming.typeSuffixMismatch"));
}

#[test]
fn test_check_reports_bare_interface_name_when_enabled() {
    let temp_dir = tempdir().unwrap();
    let types_path = temp_dir.path().join("types.yml");
    let config_path = temp_dir.path().join("nomen.yml");
    fs::write(&types_path, create_type_model()).unwrap();
    fs::write(&config_path, "naming:\n  enable_interface_bare_name_check: true\n").unwrap();

    nomen_cmd()
        .args(["check", "channel", "App\\Io\\ChannelInterface", "--types"])
        .arg(&types_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("naming.interfaceBareName"))
        .stdout(predicate::str::contains("$readChannel"));
}

#[test]
fn test_lint_json_output() {
    let temp_dir = tempdir().unwrap();
    let types_path = temp_dir.path().join("types.yml");
    let subjects_path = temp_dir.path().join("subjects.yml");
    fs::write(&types_path, create_type_model()).unwrap();
    fs::write(
        &subjects_path,
        r#"
subjects:
  - kind: variable
    name: order
    type: App\Entity\OrderEntity
  - kind: iterable_assignment
    name: orderMap
    type: array<int, App\Entity\OrderEntity>
    line: 8
"#,
    )
    .unwrap();

    let output = nomen_cmd()
        .args(["lint", "--format", "json", "--types"])
        .arg(&types_path)
        .arg(&subjects_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["subjects_checked"], 2);
    let findings = report["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["identifier"], "naming.mapForbidden");
    assert_eq!(findings[0]["subject_index"], 1);
    assert_eq!(findings[0]["line"], 8);
}

#[test]
fn test_lint_clean_subjects_succeed() {
    let temp_dir = tempdir().unwrap();
    let subjects_path = temp_dir.path().join("subjects.json");
    fs::write(
        &subjects_path,
        r#"{"subjects": [{"kind": "foreach_value", "value_name": "child", "iterable_name": "children", "iterable_type": "list<App\\Tree\\ChildNode>"}]}"#,
    )
    .unwrap();

    nomen_cmd()
        .arg("lint")
        .arg(&subjects_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no naming violations"));
}

#[test]
fn test_lint_missing_subjects_file() {
    nomen_cmd()
        .args(["lint", "/nonexistent/subjects.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load subjects"));
}

#[test]
fn test_print_default_config() {
    nomen_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("naming:"))
        .stdout(predicate::str::contains("enable_interface_bare_name_check: false"));
}

#[test]
fn test_validate_config_valid_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nomen.yml");
    fs::write(&config_path, "naming:\n  deny_candidate_names: [data, item]\n").unwrap();

    nomen_cmd()
        .arg("validate-config")
        .arg(&config_path)
        .arg("--detailed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));
}

#[test]
fn test_validate_config_json_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nomen.json");
    fs::write(
        &config_path,
        r#"{"naming": {"rules": {"foreach_value": false}}}"#,
    )
    .unwrap();

    nomen_cmd()
        .arg("validate-config")
        .arg(&config_path)
        .arg("--detailed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foreach value rule:   disabled"));
}

#[test]
fn test_validate_config_invalid_entry() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nomen.yml");
    fs::write(&config_path, "naming:\n  deny_type_names: [\"App\\\\Ok\", \"  \"]\n").unwrap();

    nomen_cmd()
        .arg("validate-config")
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration validation failed"));
}
