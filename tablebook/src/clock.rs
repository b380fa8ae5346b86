//! Source of the current wall-clock time.
//!
//! Guest cancellation and reservation creation timestamps depend on "now";
//! injecting the clock keeps both testable.

use std::time::SystemTime;

use chrono::{Local, NaiveDateTime, TimeZone};

/// Supplies the current restaurant-local time.
pub trait Clock {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current instant, for record timestamps.
    ///
    /// The default reads [`Clock::now`] in the local time zone. A local time
    /// skipped by a DST change falls back to the system time.
    fn timestamp(&self) -> SystemTime {
        Local
            .from_local_datetime(&self.now())
            .earliest()
            .map_or_else(SystemTime::now, SystemTime::from)
    }
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
