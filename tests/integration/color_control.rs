//! Integration tests for color control: `NO_COLOR`, `FORCE_COLOR`, --color flag, `TERM`.

use assert_cmd::Command;

#[allow(deprecated)]
fn kubetint() -> Command {
    let mut cmd = Command::cargo_bin("kubetint").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/kubetint-test-no-config");
    cmd.env_remove("FORCE_COLOR");
    cmd.env_remove("NO_COLOR");
    cmd
}

const INPUT: &str = r#"{"podName":"p","containerName":"c","message":"{\"level\":\"info\",\"msg\":\"hello\",\"k\":1}"}"#;

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.write_stdin(INPUT).output().unwrap();
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn color_never_disables_ansi() {
    let stdout = stdout_of(kubetint().arg("--color=never"));
    assert!(
        !stdout.contains("\x1b["),
        "Should not contain ANSI escapes with --color=never"
    );
}

#[test]
fn color_always_enables_ansi() {
    let stdout = stdout_of(kubetint().arg("--color=always"));
    assert!(
        stdout.contains("\x1b["),
        "Should contain ANSI escapes with --color=always"
    );
}

#[test]
fn piped_stdout_disables_colors_by_default() {
    let stdout = stdout_of(&mut kubetint());
    assert!(
        !stdout.contains("\x1b["),
        "Piped output should not have ANSI escapes in auto mode"
    );
}

#[test]
fn no_color_env_disables_colors() {
    let stdout = stdout_of(kubetint().env("NO_COLOR", "1").env("FORCE_COLOR", "1"));
    assert!(
        !stdout.contains("\x1b["),
        "NO_COLOR should win over FORCE_COLOR in auto mode"
    );
}

#[test]
fn force_color_enables_colors_when_piped() {
    let stdout = stdout_of(kubetint().env("FORCE_COLOR", "1"));
    assert!(
        stdout.contains("\x1b["),
        "FORCE_COLOR should enable colors in auto mode"
    );
}

#[test]
fn color_always_overrides_no_color() {
    let stdout = stdout_of(kubetint().arg("--color=always").env("NO_COLOR", "1"));
    assert!(
        stdout.contains("\x1b["),
        "--color=always should override NO_COLOR"
    );
}

#[test]
fn color_never_overrides_force_color() {
    let stdout = stdout_of(kubetint().arg("--color=never").env("FORCE_COLOR", "1"));
    assert!(
        !stdout.contains("\x1b["),
        "--color=never should override FORCE_COLOR"
    );
}

#[test]
fn pod_color_is_stable_across_runs() {
    let first = stdout_of(kubetint().arg("--color=always"));
    let second = stdout_of(kubetint().arg("--color=always"));
    assert_eq!(first, second);
}
