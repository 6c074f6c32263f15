//! Integration tests for plain-text messages and undecodable records.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn kubetint() -> Command {
    let mut cmd = Command::cargo_bin("kubetint").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/kubetint-test-no-config");
    cmd
}

#[test]
fn plain_text_message_rendered_raw() {
    let input = r#"{"podName":"p","containerName":"c","message":"plain text, not json"}"#;
    kubetint()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c plain text, not json\n");
}

#[test]
fn structured_and_plain_messages_mixed() {
    let input = r#"{"podName":"web-1","containerName":"nginx","message":"GET /healthz 200"}
{"podName":"api-0","containerName":"app","message":"{\"level\":\"error\",\"msg\":\"connection failed\"}"}
{"podName":"api-0","containerName":"app","message":"[1,2,3]"}"#;

    let output = kubetint()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        vec![
            "web-1 nginx GET /healthz 200",
            "error api-0 app connection failed",
            "api-0 app [1,2,3]",
        ]
    );
}

#[test]
fn malformed_record_skipped_and_reported() {
    let input = r#"{"podName":"p", "message":}
{"podName":"p","containerName":"c","message":"still here"}"#;

    kubetint()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c still here\n")
        .stderr(predicate::str::contains("failed to decode record"));
}

#[test]
fn non_object_record_is_an_error() {
    kubetint()
        .arg("--color=never")
        .write_stdin("[1, 2, 3]\n")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("[1, 2, 3]"));
}

#[test]
fn fail_fast_aborts_on_first_bad_record() {
    let input = r#"{"podName":"p","containerName":"c","message":"first"}
not a record
{"podName":"p","containerName":"c","message":"never printed"}"#;

    kubetint()
        .arg("--color=never")
        .arg("--fail-fast")
        .write_stdin(input)
        .assert()
        .code(3)
        .stdout("p c first\n")
        .stderr(predicate::str::contains("not a record"));
}

#[test]
fn blank_lines_ignored() {
    let input = "\n   \n{\"podName\":\"p\",\"containerName\":\"c\",\"message\":\"x\"}\n\n";
    kubetint()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c x\n");
}

#[test]
fn rust_log_enables_debug_diagnostics() {
    let input = r#"{"podName":"p","containerName":"c","message":"plain text"}"#;
    kubetint()
        .arg("--color=never")
        .env("RUST_LOG", "debug")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("p c plain text\n")
        .stderr(predicate::str::contains("message is not JSON"));
}

#[test]
fn debug_diagnostics_off_by_default() {
    let input = r#"{"podName":"p","containerName":"c","message":"plain text"}"#;
    kubetint()
        .arg("--color=never")
        .env_remove("RUST_LOG")
        .write_stdin(input)
        .assert()
        .success()
        .stderr("");
}

#[test]
fn null_envelope_fields_render_empty() {
    let input = r#"{"podName":null,"containerName":"c","message":"still shown"}"#;
    kubetint()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(" c still shown\n");
}
