use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("overwrite_exports ="));
    assert!(contents.contains("# export_dir ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_applies_export_dir_override() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .args(["--export-dir", "/tmp/downloads", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export_dir = \"/tmp/downloads\""))
        .stdout(predicate::str::contains("overwrite_exports = false"));
}

#[test]
fn test_invalid_config_reports_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "overwrite_exports = \"yes\"").unwrap();

    cargo_bin_cmd!("memfile")
        .env("MEMFILE_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"))
        .stderr(predicate::str::contains("config.toml"));
}
