//! Time handling: opening hours and reservation windows.
//!
//! All instants are restaurant-local wall-clock times. Overlap is always
//! evaluated on half-open `[start, end)` windows.

pub mod hours;
pub mod window;

#[cfg(test)]
mod proptests;

pub use hours::{
    ClockTime, DayHours, DayOfWeek, OpeningHours, OpeningHoursValidator, ValidatedSlot,
    MAX_DURATION_MINUTES,
};
pub use window::TimeWindow;
