//! Corruption recovery tests for clinic_cli.
//!
//! These tests verify the system keeps running when a store file is
//! damaged: malformed lines are skipped, unparseable files degrade to an
//! empty collection, and the other collections stay intact.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("clinic"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_malformed_patient_lines_are_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        data_dir.join("patients.txt"),
        "P100;John Doe;555-1234\nnot a record\nP101;Jane Smith;555-9876\n",
    )
    .unwrap();

    cli()
        .args(["patients", "list", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("P100"))
        .stdout(predicate::str::contains("P101"))
        .stdout(predicate::str::contains("not a record").not());
}

#[test]
fn test_unparseable_appointments_degrade_to_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        data_dir.join("appointments.txt"),
        "garbage;P100;D100;2099-01-01;10:00\n",
    )
    .unwrap();

    // Listing still works; the damaged collection is just empty.
    cli()
        .args(["appointments", "D100", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No appointments."));

    // Other collections are unaffected.
    cli()
        .args(["doctors", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("D102"));
}

#[test]
fn test_empty_staff_file_rejects_all_logins() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    // File exists but is empty, so no seeding and no valid credentials.
    fs::write(data_dir.join("staff.txt"), "").unwrap();

    cli()
        .args(["login", "admin", "password", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_booking_after_corruption_recovers_id_sequence() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("appointments.txt"), "broken line\n").unwrap();

    // The damaged store loads as empty, so ids restart at 1 and the next
    // successful booking rewrites the file cleanly.
    cli()
        .args(["schedule", "D100", "P100", "2099-01-01", "10:00", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked appointment 1"));

    let contents = fs::read_to_string(data_dir.join("appointments.txt")).unwrap();
    assert_eq!(contents.trim(), "1;P100;D100;2099-01-01;10:00");
}
