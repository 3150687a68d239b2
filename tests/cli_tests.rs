use chrono::Duration;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{TestHome, make_token};

#[test]
fn test_init_writes_default_config() {
    let home = TestHome::new();

    home.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Configuration written"));

    let content = fs::read_to_string(home.config_file()).expect("config file");
    assert!(content.contains("api_url"));
    assert!(content.contains("request_timeout_secs"));
}

#[test]
fn test_init_keeps_existing_config_without_force() {
    let home = TestHome::new();
    fs::write(home.config_file(), "api_url: http://mine.example/api\n").unwrap();

    home.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("already exists"));

    let content = fs::read_to_string(home.config_file()).unwrap();
    assert!(content.contains("mine.example"));
}

#[test]
fn test_config_print_uses_env_api_url() {
    let home = TestHome::new();

    home.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("127.0.0.1:9/api"));
}

#[test]
fn test_config_print_default_api_url() {
    let home = TestHome::new();

    home.cmd()
        .env_remove("CHECKDESK_API_URL")
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("https://checkin-api-as1t.onrender.com/api"));
}

#[test]
fn test_api_url_flag_beats_env() {
    let home = TestHome::new();

    home.cmd()
        .args(["--api-url", "http://flag.example/api", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("flag.example").and(contains("127.0.0.1").not()));
}

#[test]
fn test_whoami_without_session_fails() {
    let home = TestHome::new();

    home.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_whoami_shows_stored_identity() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("ada@example.com").and(contains("Ada Admin")));
}

#[test]
fn test_expired_session_is_dropped() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(-1)));

    home.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("Session expired"));

    assert!(!home.token_file().exists());
}

#[test]
fn test_garbage_token_counts_as_logged_out() {
    let home = TestHome::new();
    home.store_token("definitely.not.a-jwt");

    home.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("Not logged in"));

    assert!(!home.token_file().exists());
}

#[test]
fn test_logout_removes_token() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logged out"));
    assert!(!home.token_file().exists());

    home.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_reports_require_type_and_range() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args(["reports", "--type", "attendance", "--start", "2025-01-01"])
        .assert()
        .failure()
        .stderr(contains("Please select report type and date range"));

    home.cmd()
        .args(["reports", "--start", "2025-01-01", "--end", "2025-01-31"])
        .assert()
        .failure()
        .stderr(contains("Please select report type and date range"));
}

#[test]
fn test_reports_reject_bad_dates() {
    let home = TestHome::new();

    home.cmd()
        .args([
            "reports", "--type", "members", "--start", "2025-13-01", "--end", "2025-01-31",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    home.cmd()
        .args([
            "reports", "--type", "members", "--start", "2025-02-01", "--end", "2025-01-31",
        ])
        .assert()
        .failure()
        .stderr(contains("after end date"));
}

#[test]
fn test_member_add_validates_before_sending() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args(["members", "add", "--name", "Jordan Smith", "--email", "jordan@example.com"])
        .assert()
        .failure()
        .stderr(contains("missing required field").and(contains("phone")));
}

#[test]
fn test_member_add_rejects_bad_birth_date() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args([
            "members",
            "add",
            "--name",
            "Jordan Smith",
            "--email",
            "jordan@example.com",
            "--phone",
            "555-0100",
            "--gender",
            "other",
            "--dob",
            "01/02/1999",
            "--department",
            "ERA Softwares",
            "--type",
            "Student",
        ])
        .assert()
        .failure()
        .stderr(contains("YYYY-MM-DD"));
}

#[test]
fn test_admin_list_needs_superadmin() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args(["settings", "admins"])
        .assert()
        .failure()
        .stderr(contains("superadmin"));
}

#[test]
fn test_password_confirmation_must_match() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args([
            "settings", "password", "--current", "old", "--new", "one", "--confirm", "two",
        ])
        .assert()
        .failure()
        .stderr(contains("New passwords do not match"));

    // nothing was sent, so the session survives
    assert!(home.token_file().exists());
}

#[test]
fn test_network_failure_is_reported() {
    let home = TestHome::new();
    home.store_token(&make_token("admin", Duration::hours(2)));

    home.cmd()
        .args(["members", "list"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_cards_needs_a_target() {
    let home = TestHome::new();

    home.cmd()
        .args(["members", "cards"])
        .assert()
        .failure()
        .stderr(contains("--member").and(contains("--all-new")));

    home.cmd()
        .args(["members", "cards", "--member", "M1", "--all-new"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}
