//! Integration tests for the clinic_cli binary.
//!
//! These tests verify end-to-end behavior including:
//! - First-run seeding of the flat-file stores
//! - The schedule / conflict / cancel workflow
//! - Login exit codes
//! - Slot listings

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("clinic"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Clinic appointment scheduling system",
        ));
}

#[test]
fn test_first_run_seeds_stores() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["doctors", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("D100"))
        .stdout(predicate::str::contains("Cardiology"));

    assert!(data_dir.join("staff.txt").exists());
    assert!(data_dir.join("patients.txt").exists());
    assert!(data_dir.join("doctors.txt").exists());
    // Appointments are never seeded.
    assert!(!data_dir.join("appointments.txt").exists());

    let staff = fs::read_to_string(data_dir.join("staff.txt")).unwrap();
    assert_eq!(staff.trim(), "admin;password");
}

#[test]
fn test_login_exit_codes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["login", "admin", "password", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["login", "admin", "wrong", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Login failed"));

    cli()
        .args(["login", "nobody", "password", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_schedule_conflict_and_cancel_workflow() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["schedule", "D100", "P100", "2099-01-01", "10:00", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked appointment 1"));

    // Same slot, different patient: conflict.
    cli()
        .args(["schedule", "D100", "P101", "2099-01-01", "10:00", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("already booked"));

    cli()
        .args(["appointments", "D100", "--date", "2099-01-01", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00"));

    cli()
        .args(["cancel", "1", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled appointment 1"));

    cli()
        .args(["appointments", "D100", "--date", "2099-01-01", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No appointments."));
}

#[test]
fn test_schedule_rejects_past_time() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["schedule", "D100", "P100", "2001-01-01", "10:00", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("in the past"));
}

#[test]
fn test_schedule_rejects_unknown_patient() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["schedule", "D100", "P999", "2099-01-01", "10:00", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown patient"));
}

#[test]
fn test_add_patient_allocates_next_id() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    // Seeds occupy P100/P101.
    cli()
        .args(["patients", "add", "Alex Mercer", "555-2222", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("P102"));

    cli()
        .args(["patients", "list", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Mercer"));

    let patients = fs::read_to_string(data_dir.join("patients.txt")).unwrap();
    assert!(patients.contains("P102;Alex Mercer;555-2222"));
}

#[test]
fn test_slots_reflect_bookings() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["schedule", "D100", "P100", "2099-01-01", "10:00", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    let output = cli()
        .args(["slots", "D100", "2099-01-01", "--data-dir"])
        .arg(data_dir)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let slots: Vec<&str> = stdout.lines().collect();

    // Default grid is 09:00..17:00 every 30 minutes, minus the booking.
    assert_eq!(slots.len(), 15);
    assert!(!slots.contains(&"10:00"));
    assert!(slots.contains(&"09:00"));
    assert!(slots.contains(&"16:30"));
}

#[test]
fn test_patients_json_output() {
    let temp_dir = setup_test_dir();

    let output = cli()
        .args(["patients", "list", "--json", "--data-dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["id"], "P100");
}

#[test]
fn test_cancel_nonexistent_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["cancel", "42", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("No appointment with id 42"));
}

#[test]
fn test_invalid_date_reports_error() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["schedule", "D100", "P100", "01/01/2099", "10:00", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}
