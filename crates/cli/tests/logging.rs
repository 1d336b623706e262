//! Log output must never interleave with command output on stdout.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::Command;

#[test]
fn json_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_spindle"))
        .args(["--json-logs", "--log-level", "debug", "schema"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SPINDLE_CONFIG")
        .env_remove("SPINDLE_BACKEND_URL")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert!(stdout.starts_with("schema {\n"), "{stdout}");
    assert!(!stdout.contains("\"level\""), "{stdout}");
    assert!(stderr.contains("\"level\":\"DEBUG\""), "{stderr}");
}
