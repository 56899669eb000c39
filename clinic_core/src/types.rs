//! Core domain types for the clinic scheduling system.
//!
//! All four entities are plain data: constructed once, returned to callers
//! by value, never mutated in place. Appointments are created by a
//! successful booking and destroyed by a successful cancellation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A registered patient
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub contact: String,
}

/// A doctor on the clinic roster
///
/// The roster is seeded on first run and read-only afterwards; there is no
/// runtime create/update/delete for doctors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

/// A booked appointment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: u32,
    pub doctor_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Appointment {
    /// Slot equality for conflict checks. The patient is irrelevant: two
    /// appointments conflict when doctor, date, and time all match.
    pub fn occupies(&self, doctor_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        self.doctor_id == doctor_id && self.date == date && self.time == time
    }
}

/// A staff credential pair
///
/// Stored and compared in plaintext. Known weakness, see the auth module.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}
