// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn simian() -> Command {
    let mut cmd = Command::cargo_bin("simian").expect("simian binary");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1").arg("--verbose");
    cmd
}

fn run_stdout(dir: &TempDir, extra: &[&str]) -> String {
    let output = simian()
        .args(["run", "--config-dir"])
        .arg(dir.path())
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn seeded_runs_emit_one_record_per_weighted_tick() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_stdout(&dir, &["--seed", "42", "--iterations", "50", "--no-alerts"]);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 50);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["seq"], i as u64 + 1);
        assert!(record["gesture"]["kind"].is_string(), "{record}");
        assert_eq!(record["orientation"], "portrait");
    }
}

#[test]
fn same_seed_same_stream() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["--seed", "7", "--iterations", "200", "--preset", "device"];
    assert_eq!(run_stdout(&dir, &args), run_stdout(&dir, &args));
}

#[test]
fn different_seeds_diverge() {
    let dir = tempfile::tempdir().unwrap();
    let a = run_stdout(&dir, &["--seed", "1", "--iterations", "20"]);
    let b = run_stdout(&dir, &["--seed", "2", "--iterations", "20"]);
    assert_ne!(a, b);
}

#[test]
fn summary_format_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["run", "--seed", "3", "--iterations", "100", "--format", "summary"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tap"))
        .stdout(predicate::str::contains("Seed"))
        .stdout(predicate::str::contains("100"));
}

#[test]
fn logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["run", "--seed", "9", "--iterations", "5"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("monkey run finished"))
        .stdout(predicate::str::contains("monkey run").not());
}

#[test]
fn rust_log_overrides_the_verbose_level() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .env("RUST_LOG", "warn")
        .args(["run", "--seed", "1", "--iterations", "3"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("monkey run finished").not())
        .stderr(predicate::str::contains("INFO").not());
}

#[test]
fn zero_iterations_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["run", "--iterations", "0"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("iterations must be at least 1"));
}

#[test]
fn limit_flags_are_mutually_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["run", "--iterations", "5", "--forever"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn negative_frames_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["run", "--frame", "0,0,-1,10"])
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-negative"));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    simian()
        .args(["config", "init", "--profile", "smoke", "--config-dir"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("smoke.json").is_file());

    simian()
        .args(["config", "show", "--profile", "smoke", "--config-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""preset": "touch""#));

    simian()
        .args(["config", "init", "--profile", "smoke", "--config-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    simian()
        .args(["config", "init", "--profile", "smoke", "--force", "--config-dir"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn stored_profile_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("shaky.json"),
        r#"{"seed": 11, "preset": "none", "alert_interval": null,
            "actions": [{"gesture": "shake", "weight": 1.0}],
            "limit": {"iterations": 12}}"#,
    )
    .unwrap();
    let stdout = run_stdout(&dir, &["--profile", "shaky"]);
    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.lines().all(|l| l.contains(r#""kind":"shake""#)));
}
