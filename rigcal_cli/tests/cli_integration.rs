use assert_cmd::Command;
use predicates::prelude::*;

fn rigcal() -> Command {
    Command::cargo_bin("rigcal").expect("binary builds")
}

#[test]
fn help_lists_subcommands() {
    rigcal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calibrate"))
        .stdout(predicate::str::contains("scenarios"));
}

#[test]
fn scenarios_lists_known_names() {
    rigcal()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("shake-left"))
        .stdout(predicate::str::contains("momentary"));
}

#[test]
fn shake_left_scenario_completes() {
    rigcal()
        .args(["calibrate", "--scenario", "shake-left"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calibration complete"))
        .stdout(predicate::str::contains("swapped=true"));
}

#[test]
fn momentary_scenario_takes_the_shortcut() {
    rigcal()
        .args(["calibrate", "--scenario", "momentary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("momentary calibration applied"));
}

#[test]
fn unknown_scenario_fails() {
    rigcal()
        .args(["calibrate", "--scenario", "wiggle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn json_summary_is_machine_readable() {
    let output = rigcal()
        .args(["--json", "calibrate", "--scenario", "shake-right"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let summary = stdout
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with('{'))
        .expect("summary line present");
    let value: serde_json::Value = serde_json::from_str(summary).expect("valid JSON");
    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["swapped"], false);
}