#![forbid(unsafe_code)]

//! Scheduling and persistence engine for the clinic appointment system.
//!
//! This crate provides:
//! - Domain types (patients, doctors, appointments, credentials)
//! - Flat-file record codec and store
//! - Identifier allocation
//! - Booking rules (conflict detection, past-slot rejection, slot grids)
//! - Session gate for staff credentials
//! - The repository facade the front-end talks to

pub mod types;
pub mod error;
pub mod clock;
pub mod codec;
pub mod store;
pub mod ident;
pub mod config;
pub mod logging;
pub mod auth;
pub mod scheduler;
pub mod repository;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, SlotGrid};
pub use auth::SessionGate;
pub use scheduler::ScheduleOutcome;
pub use repository::ClinicRepository;
