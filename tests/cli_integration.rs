//! Integration tests for the MemVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The interactive `session` command is not covered here; everything
//! else runs non-interactively.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the memvault binary, isolated from
/// any config in the caller's environment.
fn memvault(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("memvault").expect("binary should exist");
    cmd.current_dir(dir.path()).env_remove("MEMVAULT_CONFIG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("In-memory ledger"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("fingerprint"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("memvault"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn info_shows_defaults() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base Onchain Memory Vault #8472"))
        .stdout(predicate::str::contains("BOMV8472"))
        .stdout(predicate::str::contains("10000"))
        .stdout(predicate::str::contains("0.00042"));
}

#[test]
fn info_reads_config_from_current_dir() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".memvault.toml")
        .write_str("name = \"Local Vault\"\ncapacity = 12\n")
        .unwrap();

    memvault(&tmp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local Vault"));
}

#[test]
fn invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    tmp.child("bad.toml").write_str("capacity = 0\n").unwrap();

    memvault(&tmp)
        .args(["--config", "bad.toml", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("capacity"));
}

#[test]
fn fingerprint_prints_hex_digest() {
    let tmp = TempDir::new().unwrap();
    let expected = memvault::crypto::fingerprint("hello", 1_738_281_600, "alice");

    memvault(&tmp)
        .args(["fingerprint", "alice", "hello", "--timestamp", "1738281600"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn replay_reports_outcomes_and_exports() {
    let tmp = TempDir::new().unwrap();
    tmp.child("in.json")
        .write_str(
            r#"[
                {"creator": "alice", "content": "first memory"},
                {"creator": "bob", "content": ""},
                {"creator": "carol", "content": "cheap", "payment": "1"}
            ]"#,
        )
        .unwrap();

    memvault(&tmp)
        .args(["replay", "in.json", "--export", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 admitted, 2 rejected"))
        .stderr(predicate::str::contains("empty content"))
        .stderr(predicate::str::contains("insufficient payment"));

    let exported = std::fs::read_to_string(tmp.path().join("out.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["creator"], "alice");
}

#[test]
fn replay_announces_milestones() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".memvault.toml")
        .write_str("milestones = [1, 2, 3]\n")
        .unwrap();
    tmp.child("in.jsonl")
        .write_str(
            "{\"creator\":\"a\",\"content\":\"one\"}\n{\"creator\":\"b\",\"content\":\"two\"}\n",
        )
        .unwrap();

    memvault(&tmp)
        .args(["replay", "in.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone reached: 1 memories"))
        .stdout(predicate::str::contains("Milestone reached: 2 memories"));
}

#[test]
fn replay_rejects_low_funding() {
    let tmp = TempDir::new().unwrap();
    tmp.child("in.json")
        .write_str(r#"[{"creator": "a", "content": "x"}]"#)
        .unwrap();

    memvault(&tmp)
        .args(["replay", "in.json", "--funding", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient initial funding"));
}

#[test]
fn replay_on_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .args(["replay", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn replay_refuses_to_export_over_input() {
    let tmp = TempDir::new().unwrap();
    tmp.child("in.json")
        .write_str(r#"[{"creator": "a", "content": "x"}]"#)
        .unwrap();

    memvault(&tmp)
        .args(["replay", "in.json", "--export", "in.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing"));
}

#[test]
fn completions_generate_script() {
    let tmp = TempDir::new().unwrap();
    memvault(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memvault"));
}
