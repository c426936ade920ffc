use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with `--no-color` and the given database file.
fn campdir_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("campdir").expect("Failed to find campdir binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_default_search_on_empty_directory() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No camps match your search."));
}

#[test]
fn test_cli_term_add_and_list_in_order() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["term", "add", "type", "Day Camp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Type term with ID: 1"))
        .stdout(predicate::str::contains("`day-camp`"));

    campdir_cmd(&db_path)
        .args(["term", "add", "type", "Sleepaway"])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["term", "reorder", "type", "2,1"])
        .assert()
        .success();

    let output = campdir_cmd(&db_path)
        .args(["term", "list", "type"])
        .output()
        .expect("Failed to run term list");
    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8");
    let sleepaway = stdout.find("Sleepaway").expect("missing Sleepaway");
    let day_camp = stdout.find("Day Camp").expect("missing Day Camp");
    assert!(sleepaway < day_camp);
}

#[test]
fn test_cli_duration_alias_names_week_axis() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["term", "add", "duration", "2 Weeks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Duration term"));
}

#[test]
fn test_cli_approved_camp_is_searchable() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args([
            "camp",
            "add",
            "Camp Birchwood",
            "--approved",
            "--city",
            "Stowe",
            "--state",
            "vt",
            "--min-price",
            "400",
            "--max-price",
            "900",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created camp with ID: 1"));

    campdir_cmd(&db_path)
        .args(["camp", "add", "Camp Hidden Hollow", "--state", "VT"])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["camp", "search", "--state", "VT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 camp, page 1 of 1"))
        .stdout(predicate::str::contains("Camp Birchwood"))
        .stdout(predicate::str::contains("Camp Hidden Hollow").not());

    campdir_cmd(&db_path)
        .args(["camp", "search", "--price-min", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No camps match your search."));
}

#[test]
fn test_cli_approve_lists_pending_camp() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["camp", "add", "Camp Loon Lake"])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["camp", "search", "loon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No camps match your search."));

    campdir_cmd(&db_path)
        .args(["camp", "approve", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camp 1 is now listed"));

    campdir_cmd(&db_path)
        .args(["camp", "search", "loon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camp Loon Lake"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["camp", "add", "Camp Short Lived"])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["camp", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    campdir_cmd(&db_path)
        .args(["camp", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted camp 'Camp Short Lived' (ID: 1)"));

    campdir_cmd(&db_path)
        .args(["camp", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Camp with ID 1 not found"));
}

#[test]
fn test_cli_invalid_state_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["camp", "add", "Camp Nowhere", "--state", "Vermont"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create camp"));
}

#[test]
fn test_cli_settings_set_and_show() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- digest_hour: 7"))
        .stdout(predicate::str::contains("- last_digest_date: (never)"));

    campdir_cmd(&db_path)
        .args(["settings", "set", "digest_hour", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digest_hour set to 9"));

    campdir_cmd(&db_path)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- digest_hour: 9"));

    campdir_cmd(&db_path)
        .args(["settings", "set", "digest_hour", "24"])
        .assert()
        .failure();

    campdir_cmd(&db_path)
        .args(["settings", "set", "color_scheme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_cli_contact_form_and_forced_digest() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args([
            "contact",
            "Pat Rivera",
            "pat@example.com",
            "Do you list camps in Maine?",
            "--subject",
            "Listings",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Received contact submission 1"));

    campdir_cmd(&db_path)
        .args(["notify", "digest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Digest run complete."));

    campdir_cmd(&db_path)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- last_digest_date: (never)").not());
}

#[test]
fn test_cli_contact_mail_outcome_follows_mailer() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    // No relay configured: delivery is recorded as failed, not sent.
    campdir_cmd(&db_path)
        .env_remove("CAMPDIR_SMTP_HOST")
        .args(["contact", "Pat Rivera", "pat@example.com", "Any openings?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Received contact submission 1 (emails failed)"));

    campdir_cmd(&db_path)
        .env_remove("CAMPDIR_SMTP_HOST")
        .args(["--mail-dry-run", "contact", "Pat Rivera", "pat@example.com", "Any openings?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Received contact submission 2 (emails sent)"));
}

#[test]
fn test_cli_parent_favorites_and_messages() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args([
            "camp",
            "add",
            "Camp Birchwood",
            "--approved",
            "--email",
            "director@birchwood.example",
        ])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["parent", "register", "Sam", "Lee", "sam@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered parent with ID: 1"));

    campdir_cmd(&db_path)
        .args(["parent", "favorite", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camp 1 saved to favorites"));

    campdir_cmd(&db_path)
        .args(["parent", "favorites", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Camp Birchwood"));

    campdir_cmd(&db_path)
        .args(["message", "send", "1", "1", "Bunk sizes", "How many kids per cabin?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sent message 1 to camp 1"));

    campdir_cmd(&db_path)
        .args(["notify", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Pending: 1"));
}

#[test]
fn test_cli_credential_secret_only_on_reveal() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["credential", "save", "Booking portal", "birchwood", "paddle-42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved credential with ID: 1"))
        .stdout(predicate::str::contains("paddle-42").not());

    campdir_cmd(&db_path)
        .args(["credential", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Booking portal"))
        .stdout(predicate::str::contains("paddle-42").not());

    campdir_cmd(&db_path)
        .args(["credential", "reveal", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paddle-42"));

    campdir_cmd(&db_path)
        .args(["credential", "reveal", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reveal credential"));
}

#[test]
fn test_cli_password_reset_for_unknown_and_known_parent() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    campdir_cmd(&db_path)
        .args(["parent", "register", "Sam", "Lee", "sam@example.com"])
        .assert()
        .success();

    campdir_cmd(&db_path)
        .args(["parent", "reset-password", "nobody@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No parent is registered with nobody@example.com"));

    campdir_cmd(&db_path)
        .args(["--mail-dry-run", "parent", "reset-password", "sam@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset code issued to parent 1"))
        .stdout(predicate::str::contains("(email sent)"));

    campdir_cmd(&db_path)
        .args(["parent", "redeem-reset", "not-a-real-code"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to redeem reset code"));
}

#[test]
fn test_cli_help_lists_commands() {
    Command::cargo_bin("campdir")
        .expect("Failed to find campdir binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("camp"))
        .stdout(predicate::str::contains("serve"));
}
