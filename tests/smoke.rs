//! Smoke tests -- verify the CLI runs and the subcommands wire together.

use assert_cmd::Command;
use predicates::prelude::*;

const EVENTS_TOML: &str = r#"
[[event]]
name = "logins"
kind = "discrete"
min = 0
weight = 2

[[event]]
name = "session-hours"
kind = "continuous"
min = 0.0
max = 24.0
"#;

const STATS_TOML: &str = r#"
[[profile]]
name = "logins"
mean = 9.0
std_dev = 2.0

[[profile]]
name = "session-hours"
mean = 6.5
std_dev = 1.5
"#;

#[test]
fn test_cli_help() {
    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Daily-activity anomaly detection"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("daywatch"));
}

#[test]
fn test_simulate_baseline_scan_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let events = dir.path().join("events.toml");
    let stats = dir.path().join("stats.toml");
    let dataset = dir.path().join("dataset.json");
    let baseline = dir.path().join("baseline.json");
    std::fs::write(&events, EVENTS_TOML).unwrap();
    std::fs::write(&stats, STATS_TOML).unwrap();

    Command::cargo_bin("daywatch")
        .unwrap()
        .args(["simulate", "--days", "20", "--seed", "7"])
        .arg("--events")
        .arg(&events)
        .arg("--stats")
        .arg(&stats)
        .arg("--output")
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicates::str::contains("20 days of activity"));
    assert!(dataset.exists());

    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("baseline")
        .arg("--dataset")
        .arg(&dataset)
        .arg("--output")
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicates::str::contains("Baseline statistics written"));
    assert!(baseline.exists());

    // Scoring the training data against its own baseline must produce a
    // verdict line per day and, for well-behaved data, no alert.
    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("scan")
        .arg("--events")
        .arg(&events)
        .arg("--baseline")
        .arg(&baseline)
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicates::str::contains("Day"))
        .stdout(predicates::str::contains("Threshold: 6"));
}

#[test]
fn test_scan_emits_json_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let events = dir.path().join("events.toml");
    let stats = dir.path().join("stats.toml");
    let dataset = dir.path().join("dataset.json");
    let baseline = dir.path().join("baseline.json");
    std::fs::write(&events, EVENTS_TOML).unwrap();
    std::fs::write(&stats, STATS_TOML).unwrap();

    Command::cargo_bin("daywatch")
        .unwrap()
        .args(["simulate", "--days", "15", "--seed", "11"])
        .arg("--events")
        .arg(&events)
        .arg("--stats")
        .arg(&stats)
        .arg("--output")
        .arg(&dataset)
        .assert()
        .success();

    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("baseline")
        .arg("--dataset")
        .arg(&dataset)
        .arg("--output")
        .arg(&baseline)
        .assert()
        .success();

    Command::cargo_bin("daywatch")
        .unwrap()
        .args(["scan", "--json"])
        .arg("--events")
        .arg(&events)
        .arg("--baseline")
        .arg(&baseline)
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicates::str::contains("\"any_flagged\""))
        .stdout(predicates::str::contains("\"verdicts\""));
}

#[test]
fn test_scan_rejects_truncated_dataset() {
    let dir = tempfile::TempDir::new().unwrap();
    let events = dir.path().join("events.toml");
    let dataset = dir.path().join("dataset.json");
    let baseline = dir.path().join("baseline.json");
    std::fs::write(&events, EVENTS_TOML).unwrap();

    // A dataset claiming more days than one of its series holds.
    std::fs::write(
        &dataset,
        r#"{
  "days": 3,
  "series": [
    { "name": "logins", "values": [9.0, 10.0] },
    { "name": "session-hours", "values": [6.0, 7.0, 6.5] }
  ]
}"#,
    )
    .unwrap();
    std::fs::write(
        &baseline,
        r#"{
  "entries": [
    { "name": "logins", "mean": 9.0, "std_dev": 2.0 },
    { "name": "session-hours", "mean": 6.5, "std_dev": 1.5 }
  ]
}"#,
    )
    .unwrap();

    Command::cargo_bin("daywatch")
        .unwrap()
        .arg("scan")
        .arg("--events")
        .arg(&events)
        .arg("--baseline")
        .arg(&baseline)
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicates::str::contains("2 values in a 3-day dataset"))
        .stderr(predicates::str::contains("panicked").not());
}

#[test]
fn test_simulate_missing_events_file_fails() {
    Command::cargo_bin("daywatch")
        .unwrap()
        .args([
            "simulate",
            "--events",
            "/nonexistent/events.toml",
            "--stats",
            "/nonexistent/stats.toml",
            "--days",
            "5",
        ])
        .assert()
        .failure();
}
