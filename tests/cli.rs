//! CLI surface behavior.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn rejects_an_unknown_mode() {
    Command::cargo_bin("ecdev_packager")
        .unwrap()
        .args(["--mode", "wheelhouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mode"));
}

#[test]
fn requires_a_mode() {
    Command::cargo_bin("ecdev_packager")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mode"));
}

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("ecdev_packager")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Platform-tagged package builder for the eC SDK toolchain",
        ));
}

#[test]
fn dry_run_prints_a_json_plan_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::cargo_bin("ecdev_packager")
        .unwrap()
        .current_dir(dir.path())
        .args(["--mode", "binary", "--dry-run"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).expect("plan is valid JSON");
    assert_eq!(plan["mode"], "binary");
    assert!(plan["platform"]["family"].is_string());
    assert!(plan["layout"].is_object());

    // Nothing was built or staged.
    assert!(!dir.path().join("artifacts").exists());
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn build_failure_exits_nonzero_with_a_diagnostic() {
    // No toolchain directory exists here, so even spawning the build in it
    // fails; the run must abort with exit code 1 and a clear message.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("README.md"), "# eC SDK\n").unwrap();

    Command::cargo_bin("ecdev_packager")
        .unwrap()
        .current_dir(dir.path())
        .args(["--mode", "binary"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
