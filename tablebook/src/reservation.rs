//! Reservation records and their lifecycle.
//!
//! A reservation moves through a small state machine:
//!
//! ```text
//! PENDING ──► CONFIRMED ──► CANCELLED
//!    │
//!    ├──────► REJECTED
//!    └──────► CANCELLED
//! ```
//!
//! PENDING and CONFIRMED reservations hold their tables. Entering REJECTED
//! or CANCELLED releases them, and both are terminal.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{ReservationId, RestaurantId, TableId, UserId};
use crate::schedule::{ClockTime, TimeWindow, ValidatedSlot};

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Awaiting a decision from the restaurant.
    Pending,
    /// Accepted by the restaurant.
    Confirmed,
    /// Declined by the restaurant.
    Rejected,
    /// Withdrawn by the guest or an operator.
    Cancelled,
}

impl ReservationStatus {
    /// All statuses.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Stored and displayed form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// True for statuses that hold table assignments.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// True for statuses with no outgoing edges.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Returns true if `self -> target` is an edge of the lifecycle graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::ReservationStatus::*;
    ///
    /// assert!(Pending.can_transition_to(Confirmed));
    /// assert!(Confirmed.can_transition_to(Cancelled));
    /// assert!(!Confirmed.can_transition_to(Rejected));
    /// assert!(!Rejected.can_transition_to(Confirmed));
    /// assert!(!Pending.can_transition_to(Pending));
    /// ```
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Rejected | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// True if entering this status must drop the table assignments.
    #[must_use]
    pub const fn releases_tables(self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation {
                field: "status".into(),
                message: format!(
                    "unknown status '{s}' (expected PENDING, CONFIRMED, REJECTED or CANCELLED)"
                ),
            })
    }
}

/// A reservation that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    /// Restaurant being booked.
    pub restaurant_id: RestaurantId,
    /// Guest making the booking.
    pub user_id: UserId,
    /// Reserved window.
    pub window: TimeWindow,
    /// Requested time of day, kept for display.
    pub time: ClockTime,
    /// Number of guests.
    pub party_size: u32,
}

impl ReservationDraft {
    /// Builds a draft from a validated slot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the party size is zero.
    pub fn new(
        restaurant_id: RestaurantId,
        user_id: UserId,
        slot: &ValidatedSlot,
        party_size: u32,
    ) -> Result<Self> {
        validate_party_size(party_size)?;
        Ok(Self {
            restaurant_id,
            user_id,
            window: slot.window,
            time: slot.time,
            party_size,
        })
    }

    /// Duration of the booking in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.window.duration_minutes()
    }
}

/// Checks that a party has at least one guest.
///
/// # Errors
///
/// Returns a validation error for a zero party size.
pub fn validate_party_size(party_size: u32) -> Result<()> {
    if party_size == 0 {
        return Err(Error::Validation {
            field: "party_size".into(),
            message: "party size must be at least 1".into(),
        });
    }
    Ok(())
}

/// A stored reservation together with the tables it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    restaurant_id: RestaurantId,
    user_id: UserId,
    window: TimeWindow,
    time: ClockTime,
    party_size: u32,
    status: ReservationStatus,
    table_ids: Vec<TableId>,
    created_at: SystemTime,
}

impl Reservation {
    /// Starts building a reservation from its stored id and draft fields.
    #[must_use]
    pub fn builder(id: ReservationId, draft: ReservationDraft) -> ReservationBuilder {
        ReservationBuilder {
            id,
            draft,
            status: ReservationStatus::Pending,
            table_ids: Vec::new(),
            created_at: None,
        }
    }

    /// Reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Booked restaurant.
    #[must_use]
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Guest who made the booking.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Reserved `[start, end)` window.
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Requested time of day.
    #[must_use]
    pub const fn time(&self) -> ClockTime {
        self.time
    }

    /// Duration in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.window.duration_minutes()
    }

    /// Number of guests.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Tables currently assigned, in ascending id order.
    #[must_use]
    pub fn table_ids(&self) -> &[TableId] {
        &self.table_ids
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns true if the reservation currently holds its tables.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    draft: ReservationDraft,
    status: ReservationStatus,
    table_ids: Vec<TableId>,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the status (defaults to PENDING).
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assigned tables.
    #[must_use]
    pub fn table_ids(mut self, mut table_ids: Vec<TableId>) -> Self {
        table_ids.sort_unstable();
        table_ids.dedup();
        self.table_ids = table_ids;
        self
    }

    /// Sets the creation timestamp (defaults to now).
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the party size is zero, or if a
    /// terminal reservation still lists tables.
    pub fn build(self) -> Result<Reservation> {
        validate_party_size(self.draft.party_size)?;

        if self.status.is_terminal() && !self.table_ids.is_empty() {
            return Err(Error::Validation {
                field: "table_ids".into(),
                message: format!("a {} reservation cannot hold tables", self.status),
            });
        }

        Ok(Reservation {
            id: self.id,
            restaurant_id: self.draft.restaurant_id,
            user_id: self.draft.user_id,
            window: self.draft.window,
            time: self.draft.time,
            party_size: self.draft.party_size,
            status: self.status,
            table_ids: self.table_ids,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

#[cfg(test)]
mod proptests;
