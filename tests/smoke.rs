//! Smoke tests -- verify the binary runs and the CLI surface holds.

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("thermasoak")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "CPU soak and thermal characterization",
        ));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("thermasoak")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("thermasoak"));
}

#[test]
fn test_run_subcommand_exists() {
    Command::cargo_bin("thermasoak")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success();
}

#[test]
fn test_sensors_json_snapshot() {
    Command::cargo_bin("thermasoak")
        .unwrap()
        .args(["sensors", "--json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"timestamp\""));
}

#[test]
fn test_malformed_duration_is_rejected() {
    Command::cargo_bin("thermasoak")
        .unwrap()
        .args(["run", "--duration", "soon"])
        .assert()
        .failure();
}

#[test]
fn test_short_bounded_soak_produces_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("soak.csv");

    Command::cargo_bin("thermasoak")
        .unwrap()
        .args([
            "run",
            "--duration",
            "2",
            "--workers",
            "1",
            "--no-governor",
            "--output",
        ])
        .arg(&log)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,temp_C,freq_khz,load1,throttle_hex")
    );
    assert_eq!(lines.count(), 2, "two records for a two-second soak");
}
