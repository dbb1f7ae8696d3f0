//! Integration tests for the gpgbatch CLI
//!
//! Decryption tests run against a small shell script standing in for gpg: it
//! copies the input to `--output`, and fails with a gpg-like stderr message
//! for any input whose name contains "bad".

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(unix)]
const FAKE_GPG: &str = r#"#!/bin/sh
out=""
in=""
while [ $# -gt 0 ]; do
    case "$1" in
        --version) echo "gpg (fake) 2.4.0"; exit 0 ;;
        --output) out="$2"; shift ;;
        --decrypt) in="$2"; shift ;;
    esac
    shift
done
case "$in" in
    *bad*) echo "gpg: decryption failed: Bad passphrase" >&2; exit 2 ;;
esac
cp "$in" "$out"
"#;

/// Command isolated from the developer's own config files and environment
fn gpgbatch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gpgbatch").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("GPGBATCH_") {
            cmd.env_remove(&key);
        }
    }
    cmd
}

#[cfg(unix)]
fn install_fake_gpg(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gpg");
    fs::write(&path, FAKE_GPG).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// `in/alpha` with two good files, one bad file and an ignored note; `in/beta` empty
fn create_datasets(root: &Path) {
    let alpha = root.join("in/alpha");
    fs::create_dir_all(&alpha).unwrap();
    fs::write(alpha.join("a.csv.gpg"), "id,value\n1,2\n").unwrap();
    fs::write(alpha.join("bad.csv.gpg"), "garbage").unwrap();
    fs::write(alpha.join("c.txt.gpg"), "hello").unwrap();
    fs::write(alpha.join("notes.txt"), "not encrypted").unwrap();

    fs::create_dir_all(root.join("in/beta")).unwrap();
}

#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch-decrypt GnuPG files"));
}

#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gpgbatch"));
}

#[test]
fn test_invalid_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_config_shows_defaults() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("workers = 4"))
        .stdout(predicate::str::contains("program = \"gpg\""));
}

#[test]
fn test_config_merges_repo_file_and_env() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gpgbatch.toml"), "workers = 2\nsuffix = \"pgp\"\n").unwrap();

    gpgbatch(temp_dir.path())
        .env("GPGBATCH_WORKERS", "7")
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workers\": 7"))
        .stdout(predicate::str::contains("\"suffix\": \"pgp\""));
}

#[test]
fn test_config_ignores_ambient_prefixed_env() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = gpgbatch(temp_dir.path());
    // Anything set after the helper is an explicit choice of the test
    cmd.env("GPGBATCH_SUFFIX", "pgp");

    cmd.arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("suffix = \"pgp\""));

    gpgbatch(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("suffix = \"gpg\""));
}

#[test]
fn test_check_missing_program_fails() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .args(["check", "--gpg", "definitely-not-a-real-gpg-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not installed or not available in PATH"));
}

#[test]
fn test_decrypt_requires_directories() {
    let temp_dir = TempDir::new().unwrap();
    gpgbatch(temp_dir.path())
        .args(["decrypt", "--datasets", "alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required directories"));
}

#[cfg(unix)]
#[test]
fn test_check_reports_tool_path() {
    let temp_dir = TempDir::new().unwrap();
    let fake_gpg = install_fake_gpg(temp_dir.path());

    gpgbatch(temp_dir.path())
        .args(["check", "--gpg"])
        .arg(&fake_gpg)
        .assert()
        .success()
        .stdout(predicate::str::contains("fake-gpg"));
}

#[cfg(unix)]
#[test]
fn test_decrypt_batch_with_mixed_results() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let fake_gpg = install_fake_gpg(root);
    create_datasets(root);

    gpgbatch(root)
        .args(["decrypt", "--input", "in", "--output", "out", "--summary", "reports"])
        .args(["--datasets", "alpha", "beta", "--workers", "2", "--no-progress"])
        .arg("--gpg")
        .arg(&fake_gpg)
        .assert()
        .success()
        .stderr(predicate::str::contains("Files Processed: 3"))
        .stderr(predicate::str::contains("Successfully Decrypted: 2"))
        .stderr(predicate::str::contains("Failed Decryption: 1"))
        .stderr(predicate::str::contains("No .gpg files found"));

    assert_eq!(fs::read_to_string(root.join("out/alpha/a.csv")).unwrap(), "id,value\n1,2\n");
    assert_eq!(fs::read_to_string(root.join("out/alpha/c.txt")).unwrap(), "hello");
    assert!(!root.join("out/alpha/bad.csv").exists());
    assert!(!root.join("out/alpha/notes").exists());

    let summary = fs::read_to_string(root.join("reports/decryption_summary_alpha.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Encrypted File,Decrypted File,Encrypted Bytes,Decrypted Bytes,Status",
            "a.csv.gpg,a.csv,13,13,Success",
            "bad.csv.gpg,Decryption Failed,7,0,gpg: decryption failed: Bad passphrase",
            "c.txt.gpg,c.txt,5,5,Success",
        ]
    );

    // Empty datasets are skipped without side effects
    assert!(!root.join("reports/decryption_summary_beta.csv").exists());
    assert!(!root.join("out/beta").exists());
}

#[cfg(unix)]
#[test]
fn test_decrypt_json_report_and_missing_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let fake_gpg = install_fake_gpg(root);
    create_datasets(root);

    let assert = gpgbatch(root)
        .args(["-q", "decrypt", "--input", "in", "--output", "out", "--summary", "reports"])
        .args(["--datasets", "missing", "alpha", "--format", "json"])
        .arg("--gpg")
        .arg(&fake_gpg)
        .assert()
        .failure()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    // The missing dataset does not stop the one after it
    assert_eq!(report["failed"][0]["dataset"], "missing");
    assert_eq!(report["completed"][0]["dataset"], "alpha");
    assert_eq!(report["completed"][0]["stats"]["total"], 3);
    assert!(root.join("reports/decryption_summary_alpha.csv").exists());
}

#[cfg(unix)]
#[test]
fn test_decrypt_fails_fast_without_tool() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_datasets(root);

    gpgbatch(root)
        .args(["decrypt", "--input", "in", "--output", "out", "--summary", "reports"])
        .args(["--datasets", "alpha", "--gpg", "definitely-not-a-real-gpg-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not installed or not available in PATH"));

    assert!(!root.join("out").exists());
    assert!(!root.join("reports").exists());
}

#[cfg(unix)]
#[test]
fn test_single_file_success_and_failure() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let fake_gpg = install_fake_gpg(root);
    create_datasets(root);

    gpgbatch(root)
        .args(["file", "in/alpha/c.txt.gpg", "--output", "single"])
        .arg("--gpg")
        .arg(&fake_gpg)
        .assert()
        .success()
        .stdout(predicate::str::contains("c.txt.gpg"));
    assert_eq!(fs::read_to_string(root.join("single/c.txt")).unwrap(), "hello");

    gpgbatch(root)
        .args(["file", "in/alpha/bad.csv.gpg", "--output", "single"])
        .arg("--gpg")
        .arg(&fake_gpg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bad passphrase"));
}
