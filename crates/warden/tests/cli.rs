// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the compiled `warden` binary against config files on disk.

use std::io::Write;
use std::process::{Command, Output};

fn warden(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_warden"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("warden binary runs")
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn check_config_accepts_valid_file() {
    let file = config_file(
        r#"
[server]
port = 9090

[auth]
realm = "corp"

[[auth.basic_users]]
username = "alice"
password = "wonderland"
"#,
    );
    let output = warden(&["check-config", "--config", file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config OK"));
    assert!(stdout.contains(":9090"));
    assert!(stdout.contains("basic_users=1"));
}

#[test]
fn check_config_rejects_invalid_file() {
    let file = config_file("[auth]\nrelm = \"corp\"\n");
    let output = warden(&["check-config", "--config", file.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("relm"), "stderr: {stderr}");
}

#[test]
fn check_config_rejects_missing_file() {
    let output = warden(&["check-config", "--config", "/nonexistent/warden.toml"]);
    assert!(!output.status.success());
}

#[test]
fn env_overrides_config_file() {
    let file = config_file("[server]\nport = 9090\n");
    let output = Command::new(env!("CARGO_BIN_EXE_warden"))
        .args(["check-config", "--config", file.path().to_str().unwrap()])
        .env("WARDEN_SERVER_PORT", "7070")
        .env("WARDEN_AUTH_REALM", "from-env")
        .output()
        .expect("warden binary runs");
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":7070"), "stdout: {stdout}");
    assert!(stdout.contains("realm=from-env"), "stdout: {stdout}");
}

#[test]
fn version_flag_prints_version() {
    let output = warden(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
