//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at its own scratch directory so runs don't share state.

use std::path::PathBuf;
use std::process::Command;

fn scratch_home(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("risewake-cli-test-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &PathBuf, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "risewake-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("RISEWAKE_ENV", "dev")
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn wake_dismiss_pays_base_reward() {
    let home = scratch_home("dismiss");
    let (stdout, _, code) = run_cli(&home, &["wake", "dismiss", "math"]);
    assert_eq!(code, 0, "wake dismiss failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["xp_earned"], 25);
    assert_eq!(parsed["streak"], 1);
}

#[test]
fn wake_dismiss_from_alarm_file_echoes_alarm() {
    let home = scratch_home("alarm-file");
    let alarm_path = home.join("alarm.json");
    std::fs::write(
        &alarm_path,
        r#"{
            "id": "a1",
            "hour": 6,
            "minute": 30,
            "enabled": true,
            "days": [false, true, true, false, false, true, false],
            "challenges": ["math"],
            "challenge_count": 1,
            "difficulty": "medium",
            "snooze_limit": 2,
            "vibrate": true,
            "sound": "horn",
            "wake_proof_enabled": false,
            "wake_proof_delay_min": 5,
            "morning_routine": [],
            "smart_wake_enabled": false,
            "smart_wake_window_min": 30
        }"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(
        &home,
        &[
            "wake",
            "dismiss",
            "math",
            "--alarm-file",
            alarm_path.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0, "wake dismiss with alarm file failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["alarm"]["id"], "a1");
    assert_eq!(parsed["alarm"]["time"], "6:30 AM");
    assert_eq!(parsed["alarm"]["days"], "Mon, Tue, Fri");
    assert_eq!(parsed["xp_earned"], 25);
}

#[test]
fn wake_dismiss_rejects_unknown_challenge() {
    let home = scratch_home("bad-challenge");
    let (_, stderr, code) = run_cli(&home, &["wake", "dismiss", "yoga"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown challenge type"));
}

#[test]
fn stats_profile_shows_fresh_player() {
    let home = scratch_home("profile");
    let (stdout, _, code) = run_cli(&home, &["stats", "profile"]);
    assert_eq!(code, 0, "stats profile failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["level"], 0);
    assert_eq!(parsed["xp"], 0);
}

#[test]
fn boss_rotation_lists_six_bosses() {
    let home = scratch_home("rotation");
    let (stdout, _, code) = run_cli(&home, &["boss", "rotation"]);
    assert_eq!(code, 0, "boss rotation failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 6);
}

#[test]
fn sleep_smart_wake_decision() {
    let home = scratch_home("smart-wake");
    let (stdout, _, code) = run_cli(
        &home,
        &["sleep", "smart-wake", "light", "--minutes-until-target", "10"],
    );
    assert_eq!(code, 0, "sleep smart-wake failed");
    assert!(stdout.contains("true"));

    let (stdout, _, _) = run_cli(
        &home,
        &["sleep", "smart-wake", "deep", "--minutes-until-target", "10"],
    );
    assert!(stdout.contains("false"));
}

#[test]
fn config_get_set_roundtrip() {
    let home = scratch_home("config");
    let (stdout, _, code) = run_cli(&home, &["config", "get", "alarm.hour"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = run_cli(&home, &["config", "set", "alarm.hour", "6"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, _) = run_cli(&home, &["config", "get", "alarm.hour"]);
    assert_eq!(stdout.trim(), "6");
}

#[test]
fn config_get_unknown_key_fails() {
    let home = scratch_home("config-unknown");
    let (_, stderr, code) = run_cli(&home, &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}
