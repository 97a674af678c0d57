use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output against the given database, acting as "ann"
fn waypoint_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("waypoint").expect("Failed to find waypoint binary");
    cmd.env_remove("WAYPOINT_USER")
        .arg("--no-color")
        .args(["--database-file", db_path.to_str().unwrap()])
        .args(["--user", "ann"]);
    cmd
}

/// Creates "Coast Run" from LA to SF with scenic stops every 50 miles
fn create_coast_run(db_path: &Path) {
    waypoint_cmd(db_path)
        .args([
            "trip",
            "create",
            "--name",
            "Coast Run",
            "--from",
            "LA",
            "--to",
            "SF",
            "--start-date",
            "2025-04-01",
            "--end-date",
            "2025-04-03",
            "--stop",
            "scenic",
            "--distance",
            "50",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_list_empty_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_no_command_lists_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_create_trip_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args([
            "trip",
            "create",
            "--name",
            "Coast Run",
            "--from",
            "LA",
            "--to",
            "SF",
            "--stop",
            "scenic,historical",
            "--distance",
            "50",
            "--accommodation",
            "hotel",
            "--dining",
            "casual",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Review Your Trip"))
        .stdout(predicate::str::contains("Created trip with ID: 1"))
        .stdout(predicate::str::contains("# 1. Coast Run"))
        .stdout(predicate::str::contains("Distance between stops: 50 miles"))
        .stderr(predicate::str::contains("Creating trip"))
        .stderr(predicate::str::contains("Trip 1 created successfully"));
}

#[test]
fn test_cli_create_trip_requires_name() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args(["trip", "create", "--from", "LA", "--to", "SF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip name is required"));

    waypoint_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_create_trip_requires_user() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    Command::cargo_bin("waypoint")
        .expect("Failed to find waypoint binary")
        .env_remove("WAYPOINT_USER")
        .args(["--no-color", "--database-file", db_path.to_str().unwrap()])
        .args([
            "trip", "create", "--name", "Solo", "--from", "LA", "--to", "SF", "--stop", "nature",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Sign in to create a trip"))
        .stderr(predicate::str::contains("Creating trip").not());
}

#[test]
fn test_cli_create_trip_rejects_unknown_accommodation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args([
            "trip",
            "create",
            "--name",
            "Coast Run",
            "--from",
            "LA",
            "--to",
            "SF",
            "--stop",
            "scenic",
            "--accommodation",
            "castle",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Accommodation must be one of"));
}

#[test]
fn test_cli_create_trip_rejects_distance_out_of_range() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args([
            "trip",
            "create",
            "--name",
            "Coast Run",
            "--from",
            "LA",
            "--to",
            "SF",
            "--stop",
            "scenic",
            "--distance",
            "210",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be between 0 and 200 miles"));
}

#[test]
fn test_cli_show_trip_with_preferences() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["trip", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Coast Run"))
        .stdout(predicate::str::contains("## Preferences for trip 1"))
        .stdout(predicate::str::contains("No participants found."));
}

#[test]
fn test_cli_show_missing_trip_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args(["trip", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load trip 42"));
}

#[test]
fn test_cli_update_trip() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["trip", "update", "1", "--name", "Coast Crawl", "--status", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coast Crawl"))
        .stdout(predicate::str::contains("Updated name"));

    waypoint_cmd(&db_path)
        .args(["trip", "update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes specified"));
}

#[test]
fn test_cli_update_trip_rejects_blank_values() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["trip", "update", "1", "--name", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));

    waypoint_cmd(&db_path)
        .args(["trip", "update", "1", "--to", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));

    waypoint_cmd(&db_path)
        .args(["trip", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Coast Run"))
        .stdout(predicate::str::contains("SF"));
}

#[test]
fn test_cli_distance_help_shows_step() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd(&db_path)
        .args(["trip", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in steps of 10"));
}

#[test]
fn test_cli_update_preferences() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["prefs", "update", "1", "--distance", "120", "--dining", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance between stops: 120 miles"));

    waypoint_cmd(&db_path)
        .args(["prefs", "update", "1", "--distance", "500"])
        .assert()
        .failure();
}

#[test]
fn test_cli_participants() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["participant", "add", "1", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created participant with ID: 1"));

    waypoint_cmd(&db_path)
        .args(["participant", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- bob (member"))
        .stdout(predicate::str::contains("ann").not());

    waypoint_cmd(&db_path)
        .args(["participant", "add", "1", "bob"])
        .assert()
        .failure();

    waypoint_cmd(&db_path)
        .args(["participant", "remove", "1", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed bob from trip 1"));

    waypoint_cmd(&db_path)
        .args(["participant", "remove", "1", "bob"])
        .assert()
        .failure();
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args(["trip", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    waypoint_cmd(&db_path)
        .args(["trip", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted trip 'Coast Run' (ID: 1)"));

    waypoint_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_list_filters_and_sorts() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_coast_run(&db_path);

    waypoint_cmd(&db_path)
        .args([
            "trip", "create", "--name", "Desert Loop", "--from", "Phoenix", "--to", "Tucson",
            "--stop", "nature",
        ])
        .assert()
        .success();

    waypoint_cmd(&db_path)
        .args(["trip", "list", "--search", "tucson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Desert Loop"))
        .stdout(predicate::str::contains("Coast Run").not());

    let output = waypoint_cmd(&db_path)
        .args(["trip", "list", "--sort", "name-asc"])
        .output()
        .expect("Failed to run waypoint");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let coast = stdout.find("Coast Run").expect("Coast Run listed");
    let desert = stdout.find("Desert Loop").expect("Desert Loop listed");
    assert!(coast < desert);

    waypoint_cmd(&db_path)
        .args(["trip", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}
