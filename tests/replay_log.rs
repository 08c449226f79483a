mod common;

use common::record;
use screenstore::replay::{load_snapshot, read_actions, replay, ReplayError};
use screenstore::screen::ScreenState;
use serde_json::json;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const LOGIN_LOG: &str = r#"# login flow
{"type":"SCREEN_SET","key":"login","state":{"step":1}}
{"type":"SCREEN_SET","key":"login","state":{"error":"bad pw"}}
{"type":"SCREEN_UNSET","key":"login"}
{"type":"SCREEN_SET","key":"login","state":{"step":2}}
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn screenstore_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_screenstore"))
}

#[test]
fn replays_login_flow_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "login.jsonl", LOGIN_LOG);

    let actions = read_actions(&path).unwrap();
    let (state, summary) = replay(ScreenState::new(), actions);

    assert_eq!(summary.applied, 4);
    assert_eq!(summary.unrecognized, 0);
    assert_eq!(state.get("login"), Some(&record(json!({"step": 2}))));
}

#[test]
fn snapshot_with_sentinel_loads() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "snap.json", r#"{"a":{"x":1},"b":false}"#);

    let state = load_snapshot(&path).unwrap();
    assert!(state.contains("a"));
    assert!(!state.contains("b"));
}

#[test]
fn missing_log_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_actions(&dir.path().join("nope.jsonl")).unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn cli_replay_prints_final_store() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "login.jsonl", LOGIN_LOG);
    let config = write(&dir, "config.toml", "[log]\nfilter = \"off\"\n");

    let output = screenstore_cmd()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .arg("--compact")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout, json!({"login": {"step": 2}}));
}

#[test]
fn cli_get_uses_fallback_for_absent_key() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "login.jsonl", LOGIN_LOG);
    let config = write(&dir, "config.toml", "[log]\nfilter = \"off\"\n");

    let output = screenstore_cmd()
        .arg("--config")
        .arg(&config)
        .arg("get")
        .arg(&log)
        .arg("home")
        .arg("--fallback")
        .arg(r#"{"tab":0}"#)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout, json!({"tab": 0}));
}

const LOG_FILE_ENV: &str = "SCREENSTORE_LOG";

/// Files in `dir` named `{prefix}.{secs}.{pid}`.
fn log_files(dir: &TempDir, prefix: &str) -> Vec<String> {
    fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(&format!("{prefix}.")))
        .collect()
}

#[test]
fn cli_log_env_writes_unique_log_file() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "login.jsonl", LOGIN_LOG);
    let config = write(&dir, "config.toml", "[log]\nfilter = \"info\"\n");

    let child = screenstore_cmd()
        .env(LOG_FILE_ENV, dir.path().join("run.log"))
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .expect("Failed to execute command");
    let pid = child.id();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let files = log_files(&dir, "run.log");
    assert_eq!(files.len(), 1, "expected one log file, got {files:?}");

    let name = &files[0];
    let suffix = name.strip_prefix("run.log.").unwrap();
    let (secs, file_pid) = suffix.split_once('.').unwrap();
    assert!(secs.parse::<u64>().is_ok(), "timestamp not numeric: {name}");
    assert_eq!(file_pid, pid.to_string());

    let content = fs::read_to_string(dir.path().join(name)).unwrap();
    assert!(content.contains("replay finished"));
}

#[test]
fn cli_log_file_from_config_is_used() {
    let dir = TempDir::new().unwrap();
    let log = write(&dir, "login.jsonl", LOGIN_LOG);
    let log_prefix = dir.path().join("configured.log");
    let config = write(
        &dir,
        "config.toml",
        &format!(
            "[log]\nfilter = \"info\"\nfile = {:?}\n",
            log_prefix.to_string_lossy()
        ),
    );

    let output = screenstore_cmd()
        .env_remove(LOG_FILE_ENV)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let files = log_files(&dir, "configured.log");
    assert_eq!(files.len(), 1, "expected one log file, got {files:?}");
    let content = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert!(content.contains("replay finished"));
}

#[test]
fn cli_replay_starts_from_snapshot_with_sentinels() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(&dir, "snap.json", r#"{"a":{"x":1},"b":false,"c":false}"#);
    let log = write(
        &dir,
        "actions.jsonl",
        "{\"type\":\"SCREEN_SET\",\"key\":\"b\",\"state\":{\"y\":1}}\n\
         {\"type\":\"SCREEN_UNSET\",\"key\":\"c\"}\n",
    );
    let config = write(&dir, "config.toml", "[log]\nfilter = \"off\"\n");

    let output = screenstore_cmd()
        .env_remove(LOG_FILE_ENV)
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--compact")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout, json!({"a": {"x": 1}, "b": {"y": 1}}));
}

#[test]
fn invalid_snapshot_is_snapshot_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "snap.json", r#"{"b":true}"#);

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, ReplayError::Snapshot { .. }));
}

#[test]
fn cli_invalid_snapshot_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(&dir, "snap.json", "[1, 2]");
    let log = write(&dir, "login.jsonl", LOGIN_LOG);
    let config = write(&dir, "config.toml", "[log]\nfilter = \"off\"\n");

    let output = screenstore_cmd()
        .env_remove(LOG_FILE_ENV)
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .arg("--snapshot")
        .arg(&snapshot)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid snapshot"));
}
