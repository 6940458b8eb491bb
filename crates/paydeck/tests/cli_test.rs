// Black-box CLI tests: argument parsing, help output, and offline
// failure modes. No network access.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn paydeck() -> Command {
    let mut cmd = Command::cargo_bin("paydeck").unwrap();
    // Isolate from the developer's real config and environment.
    cmd.env_remove("PAYDECK_PROFILE")
        .env_remove("PAYDECK_API_URL")
        .env_remove("PAYDECK_TOKEN");
    cmd
}

#[test]
fn no_args_shows_help() {
    paydeck()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_resources() {
    paydeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transactions"))
        .stdout(predicate::str::contains("partners"))
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("commissions"))
        .stdout(predicate::str::contains("transfers"));
}

#[test]
fn transactions_list_help_shows_shared_flags() {
    paydeck()
        .args(["transactions", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--page-size"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--to"));
}

#[test]
fn invalid_uid_is_a_usage_error() {
    paydeck()
        .args(["transactions", "get", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn invalid_date_is_a_usage_error() {
    paydeck()
        .args(["transactions", "list", "--from", "07/01/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn approve_cancel_requires_notes() {
    paydeck()
        .args([
            "transactions",
            "approve-cancel",
            "4be9e1a9-7cbd-42ea-8f5a-3ac027a1ed28",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--notes"));
}

#[test]
fn missing_token_fails_with_auth_hint() {
    paydeck()
        .args(["stats", "--api-url", "https://ops.invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("token"));
}

#[test]
fn config_path_works_offline() {
    paydeck()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
