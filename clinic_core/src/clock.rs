//! Wall-clock abstraction for past-booking validation.
//!
//! The booking rules never read ambient time directly; they take a `Clock`
//! so that the boundary between "past" and "future" is deterministic in
//! tests.

use chrono::{Local, NaiveDateTime};

/// Source of the current wall-clock instant
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The real single-machine clock (naive local time, no time zones)
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A pinned clock for deterministic tests
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
