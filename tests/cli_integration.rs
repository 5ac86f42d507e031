//! Integration tests for the IronVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Stdin is piped, so the passphrase and secret prompts each read one
//! line instead of opening a hidden terminal prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a Command for the ironvault binary, run inside `dir` with no
/// passphrase in the environment.
fn ironvault(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ironvault").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("IRONVAULT_PASSPHRASE")
        .env_remove("IRONVAULT_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Passphrase-protected local secrets vault",
        ))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ironvault"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_then_get_prints_value() {
    let tmp = TempDir::new().unwrap();

    ironvault(&tmp)
        .args(["add", "db_password", "--vault", "store"])
        .write_stdin("pw\nhunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("db_password"));

    tmp.child("store/safe.b64").assert(predicate::path::is_file());

    ironvault(&tmp)
        .args(["get", "db_password", "--vault", "store"])
        .write_stdin("pw\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn passphrase_from_environment() {
    let tmp = TempDir::new().unwrap();

    ironvault(&tmp)
        .args(["add", "token", "abc123", "--no-b64"])
        .env("IRONVAULT_PASSPHRASE", "envpw")
        .assert()
        .success();

    tmp.child("vt/safe.json").assert(predicate::path::is_file());

    ironvault(&tmp)
        .args(["get", "token", "--no-b64"])
        .env("IRONVAULT_PASSPHRASE", "envpw")
        .assert()
        .success()
        .stdout("abc123\n");
}

#[test]
fn wrong_passphrase_fails() {
    let tmp = TempDir::new().unwrap();

    ironvault(&tmp)
        .args(["add", "k", "v"])
        .write_stdin("right\n")
        .assert()
        .success();

    ironvault(&tmp)
        .args(["get", "k"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn get_on_missing_safe_fails() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .args(["get", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such safe"));
}

#[test]
fn safe_name_with_traversal_is_rejected() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .args(["add", "k", "v", "--safe", "../escape"])
        .write_stdin("pw\n")
        .assert()
        .failure();

    tmp.child("escape.b64").assert(predicate::path::missing());
}

#[test]
fn list_and_forced_delete() {
    let tmp = TempDir::new().unwrap();

    for name in ["alpha", "beta"] {
        ironvault(&tmp)
            .args(["add", name, "x", "--safe", "work"])
            .write_stdin("pw\n")
            .assert()
            .success();
    }

    ironvault(&tmp)
        .args(["list", "--safe", "work"])
        .write_stdin("pw\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"));

    ironvault(&tmp)
        .args(["delete", "alpha", "--force", "--safe", "work"])
        .write_stdin("pw\n")
        .assert()
        .success();

    ironvault(&tmp)
        .args(["get", "alpha", "--safe", "work"])
        .write_stdin("pw\n")
        .assert()
        .failure();
}

#[test]
fn config_file_sets_vault_dir() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".ironvault.toml")
        .write_str("vault_dir = \"secrets\"\nobfuscate = false\n")
        .unwrap();

    ironvault(&tmp)
        .args(["add", "k", "v"])
        .write_stdin("pw\n")
        .assert()
        .success();

    tmp.child("secrets/safe.json").assert(predicate::path::is_file());
}

#[test]
fn completions_bash() {
    let tmp = TempDir::new().unwrap();
    ironvault(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ironvault"));
}
