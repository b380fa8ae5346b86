//! Error types for the tablebook library.
//!
//! Every operation returns its failures as values of [`Error`]. Business
//! outcomes that callers are expected to handle routinely (`NoFit`,
//! `Conflict`) are ordinary variants, not panics.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ids::{ReservationId, RestaurantId, TableId};
use crate::reservation::ReservationStatus;
use crate::schedule::DayOfWeek;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn party_size() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed or out-of-range input was supplied.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The restaurant has no opening hours on the requested weekday.
    #[error("restaurant is closed on {weekday}")]
    ClosedDay {
        /// The weekday derived from the requested date.
        weekday: DayOfWeek,
    },

    /// The requested start lies outside the opening hours of that day.
    #[error("requested time {time} is outside opening hours {open}-{close}")]
    OutsideOpeningHours {
        /// The normalized requested time.
        time: String,
        /// Opening time for the day.
        open: String,
        /// Closing time for the day.
        close: String,
    },

    /// The reservation would run past closing time.
    #[error(
        "a {duration_minutes} minute reservation would end after closing at {close}; latest possible start is {latest_start}"
    )]
    DurationExceedsClosing {
        /// Requested duration in minutes.
        duration_minutes: u32,
        /// Closing time for the day.
        close: String,
        /// The latest start that still ends by closing time.
        latest_start: String,
    },

    /// No restaurant exists with the given id.
    #[error("restaurant {id} not found")]
    RestaurantNotFound {
        /// The missing restaurant.
        id: RestaurantId,
    },

    /// No table exists with the given id (or it belongs to another restaurant).
    #[error("table {id} not found")]
    TableNotFound {
        /// The missing table.
        id: TableId,
    },

    /// No reservation exists with the given id within the caller's scope.
    #[error("reservation {id} not found")]
    ReservationNotFound {
        /// The missing reservation.
        id: ReservationId,
    },

    /// The reservation does not hold the given table.
    #[error("table {table_id} is not assigned to reservation {reservation_id}")]
    AssignmentNotFound {
        /// The reservation.
        reservation_id: ReservationId,
        /// The table that was expected to be assigned.
        table_id: TableId,
    },

    /// No combination of free tables can seat the party.
    #[error("no matching tables for a party of {party_size} (at most {max_tables} tables)")]
    NoFit {
        /// The requested party size.
        party_size: u32,
        /// The largest number of tables considered for one party.
        max_tables: usize,
    },

    /// An explicitly chosen table cannot be used.
    #[error("table {table_id} is unavailable: {reason}")]
    TableUnavailable {
        /// The rejected table.
        table_id: TableId,
        /// Why the table was rejected.
        reason: TableUnavailableReason,
    },

    /// A concurrent commit claimed the chosen tables first.
    #[error("reservation conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
        /// Tables that were no longer free at commit time.
        table_ids: Vec<TableId>,
    },

    /// The caller may not perform this operation on the reservation.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why the operation was refused.
        reason: String,
    },

    /// The status change is not an edge of the lifecycle graph.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: ReservationStatus,
        /// Requested status.
        to: ReservationStatus,
    },

    /// A storage error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON column could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Reason why an explicitly chosen table was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableUnavailableReason {
    /// The table belongs to another restaurant.
    WrongRestaurant,
    /// The table is switched off.
    Inactive,
    /// The table does not seat exactly the party.
    SeatMismatch {
        /// Seats at the table.
        seats: u32,
        /// Requested party size.
        party_size: u32,
    },
    /// An active reservation overlaps the requested window.
    Occupied,
}

impl fmt::Display for TableUnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongRestaurant => write!(f, "belongs to another restaurant"),
            Self::Inactive => write!(f, "inactive"),
            Self::SeatMismatch { seats, party_size } => {
                write!(f, "seats {seats} but the party is {party_size}")
            }
            Self::Occupied => write!(f, "occupied during the requested time"),
        }
    }
}

impl Error {
    /// Returns true for the referential lookup failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RestaurantNotFound { .. }
                | Self::TableNotFound { .. }
                | Self::ReservationNotFound { .. }
                | Self::AssignmentNotFound { .. }
        )
    }

    /// Returns true if the operation lost a race and may be resubmitted.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns true for opening-hours violations.
    #[must_use]
    pub const fn is_schedule_violation(&self) -> bool {
        matches!(
            self,
            Self::ClosedDay { .. }
                | Self::OutsideOpeningHours { .. }
                | Self::DurationExceedsClosing { .. }
        )
    }

    /// Returns true if the store gave up waiting for a write lock.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            Self::Storage(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}
