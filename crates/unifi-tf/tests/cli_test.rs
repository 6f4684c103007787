//! Integration tests for the `unifi-tf` binary.
//!
//! Everything here runs without a controller: argument parsing, the kind
//! catalogue, state file handling, and the errors raised before any
//! connection is attempted.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────

/// The binary with every `UNIFI_*` variable cleared and config lookups
/// pointed at a nonexistent directory.
fn unifi_tf() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("unifi-tf");
    cmd.env("HOME", "/tmp/unifi-tf-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/unifi-tf-test-nonexistent")
        .env_remove("RUST_LOG");
    for var in [
        "UNIFI_URL",
        "UNIFI_SITE",
        "UNIFI_USERNAME",
        "UNIFI_PASSWORD",
        "UNIFI_API_KEY",
        "UNIFI_INSECURE",
        "UNIFI_CA_CERT",
        "UNIFI_TIMEOUT",
        "UNIFI_TF_STATE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_state(path: &Path) {
    let state = json!({
        "version": 1,
        "resources": {
            "iot": {
                "type": "unifi_network",
                "state": { "id": "60b8a1f2e4b0c9a1d2f3e4a5", "name": "IoT", "vlan_id": 10 },
                "identity": { "id": "60b8a1f2e4b0c9a1d2f3e4a5", "natural_key": "IoT" },
                "updated_at": "2026-01-02T03:04:05Z"
            },
            "mgmt": {
                "type": "unifi_setting_mgmt",
                "state": { "id": "s1", "ssh_enabled": true },
                "updated_at": "2026-01-02T03:04:05Z"
            }
        }
    });
    std::fs::write(path, serde_json::to_string_pretty(&state).unwrap()).unwrap();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_usage() {
    let output = unifi_tf().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_lifecycle_commands() {
    unifi_tf().arg("--help").assert().success().stdout(
        predicate::str::contains("import")
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("destroy"))
            .and(predicate::str::contains("refresh")),
    );
}

#[test]
fn version_flag() {
    unifi_tf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unifi-tf"));
}

#[test]
fn completions_zsh() {
    unifi_tf()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── kinds ───────────────────────────────────────────────────────────

#[test]
fn kinds_table_lists_every_type() {
    unifi_tf().arg("kinds").assert().success().stdout(
        predicate::str::contains("unifi_network")
            .and(predicate::str::contains("unifi_wlan"))
            .and(predicate::str::contains("unifi_client"))
            .and(predicate::str::contains("unifi_setting_mgmt"))
            .and(predicate::str::contains("disown")),
    );
}

#[test]
fn kinds_json_carries_merge_policy() {
    let output = unifi_tf().args(["kinds", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let kinds: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let network = kinds
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["type"] == "unifi_network")
        .unwrap();
    assert_eq!(network["allow_existing"], json!(true));
    assert!(network["zero_meaningful"].as_array().unwrap().contains(&json!("vlan")));
    assert!(network["skip_fields"].as_array().unwrap().contains(&json!("site_id")));
}

// ── show ────────────────────────────────────────────────────────────

#[test]
fn show_on_missing_state_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    unifi_tf()
        .args(["show", "-o", "json", "--state"])
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
    assert!(!state.exists());
}

#[test]
fn show_lists_tracked_resources() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    write_state(&state);

    unifi_tf()
        .arg("show")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("iot")
                .and(predicate::str::contains("unifi_network"))
                .and(predicate::str::contains("mgmt")),
        );
}

#[test]
fn show_one_address_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    write_state(&state);

    let output = unifi_tf()
        .args(["show", "iot", "-o", "json", "--state"])
        .arg(&state)
        .output()
        .unwrap();
    assert!(output.status.success());

    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["address"], "iot");
    assert_eq!(shown["type"], "unifi_network");
    assert_eq!(shown["state"]["vlan_id"], 10);
}

#[test]
fn corrupt_state_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, "{ not json").unwrap();

    let output = unifi_tf().arg("show").arg("--state").arg(&state).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("unreadable"));
}

// ── Errors before connecting ────────────────────────────────────────

#[test]
fn destroy_unknown_address_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    write_state(&state);

    let output = unifi_tf()
        .args(["destroy", "nope", "--yes", "--state"])
        .arg(&state)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("not tracked"));
}

#[test]
fn destroy_without_yes_needs_a_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    write_state(&state);

    let output = unifi_tf()
        .args(["destroy", "iot", "--state"])
        .arg(&state)
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[test]
fn import_unknown_type_is_a_usage_error() {
    let output = unifi_tf()
        .args(["import", "unifi_firewall_rule", "fw", "abc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unifi-tf kinds"));
}

#[test]
fn import_without_url_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    let output = unifi_tf()
        .args(["import", "unifi_network", "iot", "name=IoT", "--state"])
        .arg(&state)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("UNIFI_URL"));
}

#[test]
fn import_without_credentials_is_an_auth_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    let output = unifi_tf()
        .args([
            "import",
            "unifi_network",
            "iot",
            "name=IoT",
            "--url",
            "https://127.0.0.1:9",
            "--state",
        ])
        .arg(&state)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn apply_rejects_a_type_change_at_an_address() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let plan = dir.path().join("plan.json");
    write_state(&state);
    std::fs::write(&plan, r#"{ "name": "Guest", "security": "open" }"#).unwrap();

    let output = unifi_tf()
        .args(["apply", "unifi_wlan", "iot", "--plan"])
        .arg(&plan)
        .arg("--state")
        .arg(&state)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unifi_network"));
}

#[test]
fn refresh_with_nothing_tracked_does_not_connect() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    unifi_tf()
        .arg("refresh")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing tracked"));
}
