#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for booking restaurant tables.
//!
//! This library validates requested slots against opening hours, finds the
//! least wasteful combination of free tables for a party, commits bookings
//! atomically against concurrent requests, and drives the reservation
//! lifecycle.
//!
//! ## Core Types
//!
//! - [`TimeWindow`], [`OpeningHours`] and [`OpeningHoursValidator`]: slot validation
//! - [`Reservation`] and [`ReservationStatus`]: bookings and their lifecycle
//! - [`seating::TableAssignmentSolver`]: the table combination search
//! - [`Database`]: SQLite storage
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use tablebook::{ClockTime, OpeningHours, OpeningHoursValidator};
//!
//! let hours = OpeningHours::every_day(
//!     ClockTime::parse("12:00").unwrap(),
//!     ClockTime::parse("22:00").unwrap(),
//! );
//! let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//!
//! let slot = OpeningHoursValidator::validate(&hours, date, "19:30", 90).unwrap();
//! assert_eq!(slot.window.duration_minutes(), 90);
//! assert_eq!(slot.time.to_string(), "19:30");
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod ids;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod restaurant;
pub mod schedule;
pub mod seating;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, ReservationFilter};
pub use error::{Error, Result, TableUnavailableReason};
pub use ids::{ReservationId, RestaurantId, TableId, UserId};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    assign_table, cancel_own_reservation, create_reservation, list_free_tables, set_status,
    unassign_table, Actor, BookingRequest, ExecutionResult, OperationPlan, PlanAction, PlanExecutor,
};
pub use reservation::{Reservation, ReservationStatus};
pub use restaurant::{FreeTable, Restaurant, Table};
pub use schedule::{ClockTime, DayOfWeek, OpeningHours, OpeningHoursValidator, TimeWindow};
