//! Integration tests for the status-agent binary.
//!
//! The native store and bus binaries are pointed at paths that do not exist,
//! so every run sees a degraded device with only the lease file available.

use assert_cmd::Command;
use predicates::prelude::*;
use status_test_utils::LeaseFile;
use std::fs;
use std::path::PathBuf;

/// Get a Command for the status-agent binary
fn agent_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("status-agent"))
}

/// Write an agent config that disables the device tools.
fn offline_config(leases: &LeaseFile) -> PathBuf {
    let path = leases.dir().join("agent.toml");
    fs::write(
        &path,
        format!(
            "uci_binary = \"/nonexistent/uci\"\n\
             ubus_binary = \"/nonexistent/ubus\"\n\
             board_timeout_ms = 100\n\
             lease_file = \"{}\"\n\
             \n\
             [reload]\n\
             enabled = false\n",
            leases.path_string()
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_help_output() {
    agent_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("apply"));
}

#[test]
fn test_show_prints_leases_and_warnings() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("192.168.1.100"))
        .stdout(predicate::str::contains("laptop"))
        .stdout(predicate::str::contains("Warnings"));
}

#[test]
fn test_show_json() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);

    let output = agent_cmd()
        .arg("--config")
        .arg(&config)
        .args(["show", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["leases"], 2);
    assert_eq!(value["report"]["board"], false);
    assert_eq!(value["state"]["leases"][0]["hostname"], "laptop");
}

#[test]
fn test_lease_file_flag_overrides_config() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);
    let other = LeaseFile::with_content("1 aa:aa 10.9.9.9 override 01:ff\n");

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--lease-file")
        .arg(other.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("10.9.9.9"))
        .stdout(predicate::str::contains("192.168.1.100").not());
}

#[test]
fn test_project_writes_items_file() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);
    let output = leases.dir().join("items.json");

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("project")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("8 items"));

    let content = fs::read_to_string(&output).unwrap();
    let items: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 8);
    assert!(content.contains("/status:dhcp/dhcp-leases[id='01:00:11:22:33:44:55']/ip"));
}

#[test]
fn test_apply_rejects_read_only_edit() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);
    let edits = leases.dir().join("edits.toml");
    fs::write(
        &edits,
        "[[set]]\npath = \"/status:dhcp/dhcp-leases[id='01:00:11:22:33:44:55']/ip\"\nvalue = \"10.0.0.9\"\n",
    )
    .unwrap();

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("apply")
        .arg(&edits)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn test_apply_missing_edits_file() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("apply")
        .arg(leases.dir().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Edits file not found"));
}

#[test]
fn test_apply_malformed_edits_file_is_named() {
    let leases = LeaseFile::standard();
    let config = offline_config(&leases);
    let edits = leases.dir().join("edits.toml");
    fs::write(&edits, "[[set]]\npath = \n").unwrap();

    agent_cmd()
        .arg("--config")
        .arg(&config)
        .arg("apply")
        .arg(&edits)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse edits file"));
}

#[test]
fn test_missing_config_file() {
    agent_cmd()
        .args(["--config", "/nonexistent/agent.toml", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
