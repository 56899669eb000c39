//! Repository facade: the one object the front-end talks to.
//!
//! Owns the four record collections for the process lifetime. All four are
//! loaded once at startup (seeding defaults when a store file is absent);
//! every successful mutating command rewrites the affected collection's
//! file before returning. A failed rewrite is rolled back in memory and
//! surfaced as an error, so memory never silently runs ahead of disk.
//!
//! Single-threaded by design: no locks beyond the advisory file locks in
//! the store layer, and not safe for concurrent invocation.

use crate::auth::{PlaintextCredentials, SessionGate};
use crate::clock::{Clock, SystemClock};
use crate::config::SlotGrid;
use crate::scheduler::{self, ScheduleOutcome};
use crate::store;
use crate::types::{Appointment, Credential, Doctor, Patient};
use crate::Result;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const STAFF_FILE: &str = "staff.txt";
pub const PATIENT_FILE: &str = "patients.txt";
pub const DOCTOR_FILE: &str = "doctors.txt";
pub const APPOINTMENT_FILE: &str = "appointments.txt";

/// The scheduling and persistence engine behind the presentation layer
pub struct ClinicRepository<C: Clock = SystemClock> {
    data_dir: PathBuf,
    clock: C,
    grid: SlotGrid,
    gate: PlaintextCredentials,
    patients: BTreeMap<String, Patient>,
    doctors: BTreeMap<String, Doctor>,
    appointments: BTreeMap<u32, Appointment>,
}

impl ClinicRepository<SystemClock> {
    /// Open the repository against the real wall clock
    pub fn open(data_dir: impl Into<PathBuf>, grid: SlotGrid) -> Result<Self> {
        Self::open_with_clock(data_dir, grid, SystemClock)
    }
}

impl<C: Clock> ClinicRepository<C> {
    /// Open the repository with an injected clock
    ///
    /// Loads credentials, patients, doctors, and appointments in that
    /// order. A collection whose file exists but fails to load falls back
    /// to empty; the process keeps running with degraded data and the file
    /// on disk is left untouched.
    pub fn open_with_clock(data_dir: impl Into<PathBuf>, grid: SlotGrid, clock: C) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let credentials =
            load_collection(&data_dir.join(STAFF_FILE), seed_credentials());
        let patients = load_collection(&data_dir.join(PATIENT_FILE), seed_patients());
        let doctors = load_collection(&data_dir.join(DOCTOR_FILE), seed_doctors());
        let appointments =
            load_collection::<Appointment>(&data_dir.join(APPOINTMENT_FILE), Vec::new());

        Ok(Self {
            data_dir,
            clock,
            grid,
            gate: PlaintextCredentials::new(credentials),
            patients: patients.into_iter().map(|p| (p.id.clone(), p)).collect(),
            doctors: doctors.into_iter().map(|d| (d.id.clone(), d)).collect(),
            appointments: appointments.into_iter().map(|a| (a.id, a)).collect(),
        })
    }

    // ---------- Auth ----------

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.gate.verify(username, password)
    }

    // ---------- Patients ----------

    pub fn list_patients(&self) -> Vec<Patient> {
        self.patients.values().cloned().collect()
    }

    pub fn patient(&self, patient_id: &str) -> Option<Patient> {
        self.patients.get(patient_id).cloned()
    }

    /// Register a new patient and persist the collection
    pub fn add_patient(&mut self, name: &str, contact: &str) -> Result<Patient> {
        let id = crate::ident::next_patient_id(self.patients.keys().map(String::as_str));
        let patient = Patient {
            id: id.clone(),
            name: name.to_string(),
            contact: contact.to_string(),
        };

        self.patients.insert(id.clone(), patient.clone());
        if let Err(e) = self.save_patients() {
            self.patients.remove(&id);
            return Err(e);
        }

        tracing::info!("Registered patient {}", id);
        Ok(patient)
    }

    // ---------- Doctors ----------

    pub fn list_doctors(&self) -> Vec<Doctor> {
        self.doctors.values().cloned().collect()
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<Doctor> {
        self.doctors.get(doctor_id).cloned()
    }

    // ---------- Appointments ----------

    /// Attempt to book a slot
    ///
    /// Validation rejections come back as non-`Booked` outcomes; only a
    /// storage failure is an `Err`, and it leaves no appointment behind.
    pub fn schedule(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        patient_id: &str,
    ) -> Result<ScheduleOutcome> {
        let outcome = scheduler::try_book(
            &self.appointments,
            &self.patients,
            doctor_id,
            date,
            time,
            patient_id,
            self.clock.now(),
        );

        if let ScheduleOutcome::Booked(ref appt) = outcome {
            let id = appt.id;
            self.appointments.insert(id, appt.clone());
            if let Err(e) = self.save_appointments() {
                self.appointments.remove(&id);
                return Err(e);
            }
            tracing::info!("Booked appointment {} for {} with {}", id, patient_id, doctor_id);
        }

        Ok(outcome)
    }

    pub fn appointments_for(&self, doctor_id: &str, date: NaiveDate) -> Vec<Appointment> {
        scheduler::appointments_for(&self.appointments, doctor_id, date)
    }

    pub fn appointments_for_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        scheduler::appointments_for_doctor(&self.appointments, doctor_id)
    }

    pub fn available_slots(&self, doctor_id: &str, date: NaiveDate) -> Vec<NaiveTime> {
        scheduler::available_slots(
            &self.appointments,
            &self.grid,
            doctor_id,
            date,
            self.clock.now(),
        )
    }

    /// Remove an appointment by id; persists only when something was removed
    pub fn cancel(&mut self, appointment_id: u32) -> Result<bool> {
        match self.appointments.remove(&appointment_id) {
            Some(removed) => {
                if let Err(e) = self.save_appointments() {
                    self.appointments.insert(appointment_id, removed);
                    return Err(e);
                }
                tracing::info!("Cancelled appointment {}", appointment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ---------- Persistence ----------

    fn save_patients(&self) -> Result<()> {
        let records: Vec<Patient> = self.patients.values().cloned().collect();
        store::save(&self.data_dir.join(PATIENT_FILE), &records)
    }

    fn save_appointments(&self) -> Result<()> {
        let records: Vec<Appointment> = self.appointments.values().cloned().collect();
        store::save(&self.data_dir.join(APPOINTMENT_FILE), &records)
    }
}

/// Load one collection, degrading to empty on a file-level failure
fn load_collection<T: crate::codec::Record>(path: &Path, seed: Vec<T>) -> Vec<T> {
    match store::load_or_seed(path, seed) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(
                "Failed to load {:?}: {}. Continuing with an empty collection.",
                path,
                e
            );
            Vec::new()
        }
    }
}

fn seed_credentials() -> Vec<Credential> {
    vec![Credential {
        username: "admin".into(),
        password: "password".into(),
    }]
}

fn seed_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "P100".into(),
            name: "John Doe".into(),
            contact: "555-1234".into(),
        },
        Patient {
            id: "P101".into(),
            name: "Jane Smith".into(),
            contact: "555-9876".into(),
        },
    ]
}

fn seed_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "D100".into(),
            name: "Smith".into(),
            specialty: "General".into(),
        },
        Doctor {
            id: "D101".into(),
            name: "Jones".into(),
            specialty: "Cardiology".into(),
        },
        Doctor {
            id: "D102".into(),
            name: "Lee".into(),
            specialty: "Pediatrics".into(),
        },
    ]
}
