use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("memfile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("script"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--export-dir"));
}

#[test]
fn test_script_help_shows_strict() {
    cargo_bin_cmd!("memfile")
        .args(["script", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("FILE"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("memfile")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_form_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
