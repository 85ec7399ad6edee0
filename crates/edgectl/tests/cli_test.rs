//! Integration tests for the `edgectl` CLI binary.
//!
//! Argument parsing, help output, shell completions, offline schema
//! checks, and error exit codes run without any backend. The session
//! tests drive a wiremock controller end to end.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `edgectl` binary with env isolation.
///
/// Clears all `EDGECTL_*` env vars and points config and state
/// directories at a nonexistent path so tests never touch the user's
/// real configuration or session.
fn edgectl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("edgectl");
    cmd.env("HOME", "/tmp/edgectl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/edgectl-cli-test-nonexistent")
        .env("XDG_STATE_HOME", "/tmp/edgectl-cli-test-nonexistent")
        .env_remove("EDGECTL_CONFIG")
        .env_remove("EDGECTL_PROFILE")
        .env_remove("EDGECTL_CONTROLLER")
        .env_remove("EDGECTL_OUTPUT")
        .env_remove("EDGECTL_INSECURE")
        .env_remove("EDGECTL_TIMEOUT")
        .env_remove("EDGECTL_ORCHESTRATION")
        .env_remove("EDGECTL_USERNAME")
        .env_remove("EDGECTL_PASSWORD");
    cmd
}

/// Command isolated under `home`, with a config file pointing the
/// `lab` profile at `controller`.
fn edgectl_in(home: &Path, controller: &str) -> assert_cmd::Command {
    let config = home.join("config.toml");
    std::fs::write(
        &config,
        format!(
            "default_profile = \"lab\"\n\n[profiles.lab]\ncontroller_url = \"{controller}\"\nusername = \"admin\"\n"
        ),
    )
    .unwrap();

    let mut cmd = edgectl_cmd();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("XDG_STATE_HOME", home)
        .env("EDGECTL_CONFIG", &config);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a blocking command from inside an async test.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = edgectl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    edgectl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("nodes")
            .and(predicate::str::contains("apps"))
            .and(predicate::str::contains("policies"))
            .and(predicate::str::contains("subscriptions")),
    );
}

#[test]
fn test_version_flag() {
    edgectl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgectl"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    edgectl_cmd().arg("frobnicate").assert().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    edgectl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    edgectl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edgectl"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_nodes_without_config_fails() {
    let output = edgectl_cmd().args(["nodes", "list"]).output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("Configuration file not found"),
        "Expected missing-config message:\n{text}"
    );
}

#[test]
fn test_nodes_without_session_exits_with_auth_code() {
    let home = tempfile::tempdir().unwrap();
    let output = edgectl_in(home.path(), "http://127.0.0.1:9")
        .args(["nodes", "list"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not logged in to profile 'lab'"));
}

#[test]
fn test_status_reports_profile_without_session() {
    let home = tempfile::tempdir().unwrap();
    edgectl_in(home.path(), "http://127.0.0.1:9")
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lab")
                .and(predicate::str::contains("http://127.0.0.1:9/"))
                .and(predicate::str::contains("not logged in")),
        );
}

#[test]
fn test_config_profiles_marks_default() {
    let home = tempfile::tempdir().unwrap();
    edgectl_in(home.path(), "http://127.0.0.1:9")
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab *"));
}

// ── Offline schema checks ───────────────────────────────────────────

#[test]
fn test_schema_fields_lists_node_add_inputs() {
    edgectl_cmd()
        .args(["schema", "fields", "node-add", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("name")
                .and(predicate::str::contains("location"))
                .and(predicate::str::contains("serial")),
        );
}

#[test]
fn test_schema_validate_reports_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("node.json");
    std::fs::write(&payload, r#"{"name": "edge-1"}"#).unwrap();

    let output = edgectl_cmd()
        .args(["schema", "validate", "node-add", "--from-file"])
        .arg(&payload)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("serial"), "Expected field error:\n{text}");
}

#[test]
fn test_schema_validate_accepts_complete_payload() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("node.json");
    std::fs::write(
        &payload,
        r#"{"name": "edge-1", "location": "rack 3", "serial": "SN-1"}"#,
    )
    .unwrap();

    edgectl_cmd()
        .args(["schema", "validate", "node-add", "--from-file"])
        .arg(&payload)
        .assert()
        .success();
}

#[test]
fn test_schema_rejects_unknown_kind() {
    edgectl_cmd()
        .args(["schema", "show", "widget"])
        .assert()
        .code(2);
}

// ── Session round trip ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_list_nodes_as_json() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": [
                {"id": "n1", "name": "edge-1", "location": "rack 3", "serial": "SN-1"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut login = edgectl_in(home.path(), &server.uri());
    login.env("EDGECTL_PASSWORD", "secret").arg("login");
    let output = run(login).await;
    assert!(
        output.status.success(),
        "login failed:\n{}",
        combined_output(&output)
    );

    let mut list = edgectl_in(home.path(), &server.uri());
    list.args(["nodes", "list", "-o", "json"]);
    let output = run(list).await;
    assert!(
        output.status.success(),
        "nodes list failed:\n{}",
        combined_output(&output)
    );

    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(nodes[0]["id"], "n1");
    assert_eq!(nodes[0]["name"], "edge-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let mut login = edgectl_in(home.path(), &server.uri());
    login.env("EDGECTL_PASSWORD", "wrong").arg("login");
    let output = run(login).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("bad credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_session_exits_with_auth_code() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut login = edgectl_in(home.path(), &server.uri());
    login.env("EDGECTL_PASSWORD", "secret").arg("login");
    assert!(run(login).await.status.success());

    let mut list = edgectl_in(home.path(), &server.uri());
    list.args(["apps", "list"]);
    let output = run(list).await;
    assert_eq!(output.status.code(), Some(3));

    // The 401 cleared the stored session.
    let mut status = edgectl_in(home.path(), &server.uri());
    status.arg("status");
    let output = run(status).await;
    assert!(String::from_utf8_lossy(&output.stdout).contains("not logged in"));
}
