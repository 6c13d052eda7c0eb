//! Integration tests for the ctxsync binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Get a Command for the ctxsync binary
fn ctxsync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ctxsync"))
}

const CONFLICT_SCRIPT: &str = r#"
root = "/repo"

[[steps]]
kind = "evaluation"
version = 1
added = ["A.cs", "B.cs"]

[[steps]]
kind = "evaluation"
version = 2
removed = ["B.cs"]

[[steps]]
kind = "build"
version = 1
added = ["B.cs", "obj/Generated.cs"]
"#;

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    ctxsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn test_version_output() {
    ctxsync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ctxsync"));
}

#[test]
fn test_no_command_shows_help_hint() {
    ctxsync_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("ctxsync --help"));
}

// ============================================================================
// Replay Tests
// ============================================================================

#[test]
fn test_replay_text_output() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.toml");
    fs::write(&script, CONFLICT_SCRIPT).unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("/repo/obj/Generated.cs"))
        .stdout(predicate::str::contains("pending evaluations: 1"));
}

#[test]
fn test_replay_json_output() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.toml");
    fs::write(&script, CONFLICT_SCRIPT).unwrap();

    let output = ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["tracked"],
        serde_json::json!(["/repo/A.cs", "/repo/obj/Generated.cs"])
    );
    // B.cs was removed by evaluation 2, so the build only adds Generated.cs
    assert_eq!(report["steps"][2]["calls"].as_array().unwrap().len(), 1);
    assert_eq!(report["steps"][2]["summary"]["added"], 1);
}

#[test]
fn test_replay_excluded_item() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.json");
    fs::write(
        &script,
        r#"{
            "root": "/repo",
            "steps": [{
                "kind": "evaluation",
                "version": 1,
                "added": ["a.cs", "linux.cs"],
                "current_metadata": {"linux.cs": {"ExcludeFromCurrentConfiguration": "true"}}
            }]
        }"#,
    )
    .unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 excluded)"))
        .stdout(predicate::str::contains("/repo/linux.cs").not());
}

#[test]
fn test_replay_changed_build_item_fails() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.yaml");
    fs::write(
        &script,
        "root: /repo\nsteps:\n  - kind: build\n    version: 1\n    changed: [a.cs]\n",
    )
    .unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("step 1 failed"))
        .stderr(predicate::str::contains("Contract violation"));
}

#[test]
fn test_replay_scripted_context_failure() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.toml");
    fs::write(
        &script,
        r#"
root = "/repo"
fail_on = ["b.cs"]

[[steps]]
kind = "evaluation"
version = 1
added = ["a.cs", "b.cs"]
"#,
    )
    .unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stdout(predicate::str::contains("v1: +1 -0 ~0"))
        .stdout(predicate::str::contains("/repo/a.cs"))
        .stderr(predicate::str::contains("rejected add of /repo/b.cs"));
}

#[test]
fn test_replay_missing_script() {
    let dir = tempdir().unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_replay_relative_root_rejected() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.toml");
    fs::write(&script, "root = \"repo\"\n").unwrap();

    ctxsync_cmd()
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}
