//! CLI contract tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::json;

const ACTION_PAYLOAD: &str = r#"{
  "user": {"userId": "u1", "locale": "en-US"},
  "conversation": {"conversationId": "c1", "type": "ACTIVE"},
  "surface": {"capabilities": [
    {"name": "actions.capability.SCREEN_OUTPUT"},
    {"name": "actions.capability.WEB_BROWSER"}
  ]},
  "customField": 1
}"#;

const BUSINESS_PAYLOAD: &str =
    r#"{"agent": "brands/1/agents/2", "conversationId": "conv-5", "sendTime": "2024-05-01T12:00:00Z"}"#;

/// Write a compact-output config into `dir` and return its path.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let contents = format!("[output]\npretty = false\n{extra}");
    std::fs::write(&path, contents).expect("should write config");
    path
}

fn turnbridge(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("turnbridge").expect("binary should build");
    cmd.arg("--config").arg(config);
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

#[test]
fn inspect_prints_canonical_view() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, ACTION_PAYLOAD).expect("should write payload");

    let view = stdout_json(turnbridge(&config).arg("inspect").arg(&payload));
    assert_eq!(view["platform"], json!("google-action"));
    assert_eq!(view["session_id"], json!("c1"));
    assert_eq!(view["new_session"], json!(false));
    assert_eq!(view["device_name"], json!("GOOGLE_ASSISTANT_PHONE"));
}

#[test]
fn inspect_reads_stdin() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    let view = stdout_json(
        turnbridge(&config)
            .arg("inspect")
            .arg("-")
            .write_stdin(BUSINESS_PAYLOAD),
    );
    assert_eq!(view["platform"], json!("google-business"));
    assert_eq!(view["user_id"], json!("conv-5"));
}

#[test]
fn roundtrip_preserves_payload() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    let out = stdout_json(
        turnbridge(&config)
            .arg("roundtrip")
            .arg("-")
            .write_stdin(ACTION_PAYLOAD),
    );
    let expected: serde_json::Value =
        serde_json::from_str(ACTION_PAYLOAD).expect("fixture is JSON");
    assert_eq!(out, expected);
}

#[test]
fn platform_flag_overrides_detection() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    let view = stdout_json(
        turnbridge(&config)
            .args(["inspect", "-", "--platform", "google-action"])
            .write_stdin(BUSINESS_PAYLOAD),
    );
    assert_eq!(view["platform"], json!("google-action"));
    assert_eq!(view["session_id"], json!(null));
}

#[test]
fn configured_default_platform_is_used() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "[platform]\ndefault = \"google-business\"\n");

    let view = stdout_json(
        turnbridge(&config)
            .args(["inspect", "-"])
            .write_stdin(ACTION_PAYLOAD),
    );
    assert_eq!(view["platform"], json!("google-business"));
}

#[test]
fn detect_prints_platform_name() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    let assert = turnbridge(&config)
        .args(["detect", "-"])
        .write_stdin(BUSINESS_PAYLOAD)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert_eq!(stdout.trim(), "google-business");
}

#[test]
fn malformed_payload_fails() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    turnbridge(&config)
        .args(["inspect", "-"])
        .write_stdin("{\"user\": ")
        .assert()
        .failure();
}

#[test]
fn unknown_payload_fails_detection() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    turnbridge(&config)
        .args(["detect", "-"])
        .write_stdin("{\"hello\": \"world\"}")
        .assert()
        .failure();
}

#[test]
fn unknown_platform_flag_is_rejected() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), "");

    turnbridge(&config)
        .args(["inspect", "-", "--platform", "alexa"])
        .write_stdin(ACTION_PAYLOAD)
        .assert()
        .failure();
}
