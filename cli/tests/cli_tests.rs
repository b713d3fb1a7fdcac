//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("dts-enumify").expect("binary should exist")
}

fn declaration_tree() -> String {
    serde_json::json!([
        { "kind": "typeAlias", "name": "Status", "ty": { "kind": "union", "members": [
            { "kind": "stringLiteral", "value": "active" },
            { "kind": "stringLiteral", "value": "inactive" }
        ]}},
        { "kind": "typeAlias", "name": "Priority", "ty": { "kind": "union", "members": [
            { "kind": "stringLiteral", "value": "low" },
            { "kind": "stringLiteral", "value": "high" }
        ]}}
    ])
    .to_string()
}

fn status_schema() -> String {
    serde_json::json!({
        "properties": {
            "status": { "type": "string", "enum": ["active", "inactive"] }
        }
    })
    .to_string()
}

// ── Transform to File ───────────────────────────────────────────────────────

#[test]
fn test_transform_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    let output = dir.path().join("out.json");

    fs::write(&input, declaration_tree()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["--strategy", "all"])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let out_content = fs::read_to_string(&output).expect("output file should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&out_content).expect("output should be valid JSON");
    let kinds: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["enum", "enum"]);
}

// ── Transform to Stdout ─────────────────────────────────────────────────────

#[test]
fn test_transform_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    fs::write(&input, declaration_tree()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["--strategy", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enum\""));
}

// ── Schema Strategy ─────────────────────────────────────────────────────────

#[test]
fn test_schema_flag_gates_promotion() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    let schema = dir.path().join("schema.json");
    let output = dir.path().join("out.json");

    fs::write(&input, declaration_tree()).unwrap();
    fs::write(&schema, status_schema()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["--schema", schema.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let kinds: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    // Status (schema-defined) promoted; Priority survives as an alias.
    assert_eq!(kinds, vec!["enum", "typeAlias"]);
}

#[test]
fn test_schema_strategy_without_schemas_warns() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    fs::write(&input, declaration_tree()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("No schema files"));
}

// ── Const Enums ─────────────────────────────────────────────────────────────

#[test]
fn test_const_enums_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tree.json");
    fs::write(&input, declaration_tree()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["--strategy", "all", "--const-enums"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isConst\": true"));
}

// ── Error Handling ──────────────────────────────────────────────────────────

#[test]
fn test_invalid_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "this is not JSON").unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"));
}

#[test]
fn test_missing_input_file() {
    cmd()
        .arg("/nonexistent/tree.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

// ── Help ────────────────────────────────────────────────────────────────────

#[test]
fn test_help_output() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("--casing"))
        .stdout(predicate::str::contains("--const-enums"));
}
