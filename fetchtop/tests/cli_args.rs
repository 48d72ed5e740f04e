//! CLI behavior tests for the fetchtop binary.

use std::time::Duration;

use assert_cmd::Command;

fn fetchtop() -> Command {
    let mut cmd = Command::cargo_bin("fetchtop").expect("binary built");
    // One-shot aggregation spawns real probes; give slow hosts room.
    cmd.timeout(Duration::from_secs(60));
    cmd
}

#[test]
fn once_prints_the_panel_text() {
    let assert = fetchtop().arg("--once").assert().success();
    let text = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    let title = text.lines().next().unwrap_or_default();
    assert!(title.contains('@'), "no user@host title line:\n{text}");
    for label in ["os:", "kernel:", "uptime:", "battery:", "packages:"] {
        assert!(text.contains(label), "missing {label} row:\n{text}");
    }
}

#[test]
fn once_json_parses_and_carries_the_fields() {
    let assert = fetchtop().args(["--once", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");

    for key in ["user", "host", "os_name", "battery", "mem_total_bytes"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn json_without_once_is_rejected() {
    let assert = fetchtop().arg("--json").assert().failure().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("--json only applies to --once"));
}

#[test]
fn unknown_flag_fails_with_usage() {
    let assert = fetchtop().arg("--bogus").assert().failure().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("Usage:"), "no usage line:\n{stderr}");
}

#[test]
fn zero_refresh_is_rejected() {
    fetchtop()
        .args(["--refresh", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn help_prints_usage_and_succeeds() {
    let assert = fetchtop().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--once"));
}
