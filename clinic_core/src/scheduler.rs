//! Booking rules: precondition chain, conflict detection, listings, and
//! slot-grid computation.
//!
//! Everything here is a pure function over the appointment table plus an
//! explicit `now` instant; the repository facade owns mutation and
//! persistence.

use crate::config::SlotGrid;
use crate::ident;
use crate::types::{Appointment, Patient};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// Outcome of a booking attempt
///
/// The rejection variants carry the reason; `is_booked` preserves the
/// plain success/failure contract for callers that do not care.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Slot was free and the appointment was created
    Booked(Appointment),
    /// The patient id does not resolve to a registered patient
    UnknownPatient,
    /// The requested date/time is strictly before the current instant
    PastSlot,
    /// Another appointment already holds this doctor/date/time
    SlotTaken,
}

impl ScheduleOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, ScheduleOutcome::Booked(_))
    }

    /// Human-readable reason for a rejection, None when booked
    pub fn rejection_reason(&self) -> Option<&'static str> {
        match self {
            ScheduleOutcome::Booked(_) => None,
            ScheduleOutcome::UnknownPatient => Some("unknown patient"),
            ScheduleOutcome::PastSlot => Some("requested time is in the past"),
            ScheduleOutcome::SlotTaken => Some("the doctor is already booked at that time"),
        }
    }
}

/// Whether any appointment already occupies the slot
pub fn slot_taken(
    appointments: &BTreeMap<u32, Appointment>,
    doctor_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> bool {
    appointments
        .values()
        .any(|appt| appt.occupies(doctor_id, date, time))
}

/// Evaluate the booking preconditions in order, first failure wins
///
/// Checks: patient exists, slot is not in the past, slot is free. On
/// success the returned appointment carries a freshly allocated id; it has
/// not been inserted or persisted yet.
pub fn try_book(
    appointments: &BTreeMap<u32, Appointment>,
    patients: &BTreeMap<String, Patient>,
    doctor_id: &str,
    date: NaiveDate,
    time: NaiveTime,
    patient_id: &str,
    now: NaiveDateTime,
) -> ScheduleOutcome {
    if !patients.contains_key(patient_id) {
        tracing::debug!("Booking rejected: patient {} not registered", patient_id);
        return ScheduleOutcome::UnknownPatient;
    }

    if date.and_time(time) < now {
        tracing::debug!("Booking rejected: {} {} is in the past", date, time);
        return ScheduleOutcome::PastSlot;
    }

    if slot_taken(appointments, doctor_id, date, time) {
        tracing::debug!(
            "Booking rejected: doctor {} already booked at {} {}",
            doctor_id,
            date,
            time
        );
        return ScheduleOutcome::SlotTaken;
    }

    let id = ident::next_appointment_id(appointments.keys().copied());
    ScheduleOutcome::Booked(Appointment {
        id,
        doctor_id: doctor_id.to_string(),
        patient_id: patient_id.to_string(),
        date,
        time,
    })
}

/// A doctor's appointments on one date, ascending by time
pub fn appointments_for(
    appointments: &BTreeMap<u32, Appointment>,
    doctor_id: &str,
    date: NaiveDate,
) -> Vec<Appointment> {
    let mut result: Vec<Appointment> = appointments
        .values()
        .filter(|appt| appt.doctor_id == doctor_id && appt.date == date)
        .cloned()
        .collect();
    result.sort_by_key(|appt| appt.time);
    result
}

/// All of a doctor's appointments, ascending by (date, time)
pub fn appointments_for_doctor(
    appointments: &BTreeMap<u32, Appointment>,
    doctor_id: &str,
) -> Vec<Appointment> {
    let mut result: Vec<Appointment> = appointments
        .values()
        .filter(|appt| appt.doctor_id == doctor_id)
        .cloned()
        .collect();
    result.sort_by_key(|appt| (appt.date, appt.time));
    result
}

/// Free slot start-times for a doctor on a date
///
/// Starts from the configured candidate grid, removes slots already booked
/// for that doctor/date, and, when the date is today, removes slots at or
/// before the current time.
pub fn available_slots(
    appointments: &BTreeMap<u32, Appointment>,
    grid: &SlotGrid,
    doctor_id: &str,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    grid.candidates()
        .into_iter()
        .filter(|time| !slot_taken(appointments, doctor_id, date, *time))
        .filter(|time| date != now.date() || *time > now.time())
        .collect()
}
