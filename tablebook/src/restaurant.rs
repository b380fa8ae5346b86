//! Restaurant and table records.
//!
//! The engine only reads these; they are written by catalog import.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{RestaurantId, TableId};
use crate::schedule::OpeningHours;

/// A restaurant with its weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Restaurant id.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Seating capacity hint. When absent the active seat sum is used.
    pub capacity: Option<u32>,
    /// Weekly opening hours.
    pub opening_hours: OpeningHours,
}

impl Restaurant {
    /// Capacity used for occupancy figures.
    ///
    /// Falls back to the number of seats at active tables when no explicit
    /// capacity is configured.
    #[must_use]
    pub fn effective_capacity(&self, tables: &[Table]) -> u32 {
        self.capacity.unwrap_or_else(|| {
            tables
                .iter()
                .filter(|t| t.is_active && t.restaurant_id == self.id)
                .map(|t| t.seats)
                .sum()
        })
    }
}

/// A physical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table id.
    pub id: TableId,
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Optional label shown to staff.
    pub name: Option<String>,
    /// Fixed seat count.
    pub seats: u32,
    /// Whether the table can be booked.
    pub is_active: bool,
}

/// A table that is free for some window, as returned by availability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeTable {
    /// Table id.
    pub table_id: TableId,
    /// Seat count.
    pub seats: u32,
}

/// Fields of a restaurant to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    /// Display name.
    pub name: String,
    /// Optional capacity hint.
    pub capacity: Option<u32>,
    /// Weekly opening hours.
    pub opening_hours: OpeningHours,
}

impl NewRestaurant {
    /// Validates the record before insertion.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: "restaurant name must be non-empty".into(),
            });
        }
        Ok(())
    }
}

/// Fields of a table to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Optional label.
    pub name: Option<String>,
    /// Seat count, at least one.
    pub seats: u32,
    /// Whether the table can be booked.
    pub is_active: bool,
}

impl NewTable {
    /// Validates the record before insertion.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the table has no seats.
    pub fn validate(&self) -> Result<()> {
        if self.seats == 0 {
            return Err(Error::Validation {
                field: "seats".into(),
                message: "a table must have at least one seat".into(),
            });
        }
        Ok(())
    }
}
