//! Integration tests for the config file and its interaction with CLI flags.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn kubetint() -> Command {
    let mut cmd = Command::cargo_bin("kubetint").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/kubetint-test-no-config");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn record(message: &str) -> String {
    serde_json::json!({"podName": "p", "containerName": "c", "message": message}).to_string()
}

#[test]
fn config_file_custom_trace_key() {
    let file = config_file(
        r#"
[keys]
trace = "trace_id"
"#,
    );
    let input = record(
        r#"{"msg":"m","trace_id":"4bf92f3577b34da6","logging.googleapis.com/trace":"old"}"#,
    );
    kubetint()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c b34da6 m\n");
}

#[test]
fn config_file_extra_omit_keys() {
    let file = config_file(r#"omit = ["pid", "hostname"]"#);
    let input = record(r#"{"msg":"m","pid":1,"hostname":"h","user":"alice"}"#);
    kubetint()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c m {\"user\":\"alice\"}\n");
}

#[test]
fn config_file_extra_timestamp_layout() {
    let file = config_file(r#"timestamp_layouts = ["%d/%m/%Y %H:%M:%S"]"#);
    let input = record(r#"{"ts":"02/01/2024 03:04:05","msg":"m"}"#);
    kubetint()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(input)
        .assert()
        .success()
        .stdout("2024-01-02T03:04:05.000Z p c m\n");
}

#[test]
fn config_file_color_setting() {
    let file = config_file(r#"color = "always""#);
    let output = kubetint()
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(record("x"))
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b["), "config color=always should apply");
}

#[test]
fn cli_overrides_config_file() {
    let file = config_file(r#"color = "always""#);
    let output = kubetint()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(record("x"))
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("\x1b["), "--color=never should win");
}

#[test]
fn fail_fast_from_config_file() {
    let file = config_file("fail_fast = true");
    kubetint()
        .arg("--color=never")
        .arg(format!("--config={}", file.path().display()))
        .write_stdin("{broken\n")
        .assert()
        .code(3);
}

#[test]
fn invalid_config_file_exits_one() {
    let file = config_file(r#"color = "sometimes""#);
    kubetint()
        .arg(format!("--config={}", file.path().display()))
        .write_stdin(record("x"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}

#[test]
fn missing_config_file_exits_one() {
    kubetint()
        .arg("--config=/nonexistent/kubetint.toml")
        .write_stdin(record("x"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn default_config_location_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("kubetint")).unwrap();
    std::fs::write(
        dir.path().join("kubetint").join("config.toml"),
        r#"omit = ["user"]"#,
    )
    .unwrap();

    kubetint()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("--color=never")
        .write_stdin(record(r#"{"msg":"m","user":"alice"}"#))
        .assert()
        .success()
        .stdout("p c m\n");
}
