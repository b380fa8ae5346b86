//! Read-only views over reservations.
//!
//! These back the operator panel, the guest's booking list, the
//! administrator listing, and the restaurant dashboard.

use chrono::{Days, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

use crate::database::{Database, ReservationFilter};
use crate::error::{Error, Result};
use crate::ids::{RestaurantId, UserId};
use crate::reservation::{Reservation, ReservationStatus};

/// Reservations of a restaurant, optionally narrowed to a day and status.
///
/// # Errors
///
/// Returns `RestaurantNotFound` for an unknown restaurant, or a storage error.
pub fn restaurant_reservations(
    conn: &Connection,
    restaurant_id: RestaurantId,
    date: Option<NaiveDate>,
    status: Option<ReservationStatus>,
) -> Result<Vec<Reservation>> {
    if Database::get_restaurant(conn, restaurant_id)?.is_none() {
        return Err(Error::RestaurantNotFound { id: restaurant_id });
    }

    let mut filter = ReservationFilter::new().restaurant(restaurant_id);
    if let Some(date) = date {
        filter = filter.date(date);
    }
    if let Some(status) = status {
        filter = filter.statuses(&[status]);
    }
    Database::list_reservations(conn, &filter)
}

/// A guest's reservations, leaving out the ones that were cancelled.
///
/// # Errors
///
/// Returns a storage error if the query fails.
pub fn guest_reservations(conn: &Connection, user_id: UserId) -> Result<Vec<Reservation>> {
    Database::list_reservations(conn, &ReservationFilter::new().user(user_id).exclude_cancelled())
}

/// One page of all reservations, for administrators.
///
/// Pages are numbered from 1.
///
/// # Errors
///
/// Returns `Validation` for a zero page or page size, or a storage error.
pub fn all_reservations(conn: &Connection, page: u32, page_size: u32) -> Result<Vec<Reservation>> {
    if page == 0 || page_size == 0 {
        return Err(Error::Validation {
            field: "page".into(),
            message: "page and page size must be at least 1".into(),
        });
    }
    let filter = ReservationFilter::new()
        .limit(page_size)
        .offset((page - 1).saturating_mul(page_size));
    Database::list_reservations(conn, &filter)
}

/// A restaurant's day at a glance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Restaurant shown.
    pub restaurant_id: RestaurantId,
    /// The day shown.
    pub date: NaiveDate,
    /// Active reservations starting that day.
    pub today: Vec<Reservation>,
    /// Active reservations starting the next day.
    pub tomorrow: Vec<Reservation>,
    /// Guests booked today as a share of capacity, capped at 100.
    pub occupancy_percent: u32,
    /// Capacity the percentage is based on.
    pub capacity: u32,
}

impl Dashboard {
    /// Builds the dashboard of `restaurant_id` for `date`.
    ///
    /// Capacity is the restaurant's configured hint, or the seats at its
    /// active tables when none is set. A capacity of zero gives 0%.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantNotFound` for an unknown restaurant, or a storage
    /// error.
    pub fn load(conn: &Connection, restaurant_id: RestaurantId, date: NaiveDate) -> Result<Self> {
        let restaurant = Database::get_restaurant(conn, restaurant_id)?
            .ok_or(Error::RestaurantNotFound { id: restaurant_id })?;
        let tables = Database::list_tables(conn, restaurant_id)?;
        let capacity = restaurant.effective_capacity(&tables);

        let active = |day: NaiveDate| {
            let filter = ReservationFilter::new()
                .restaurant(restaurant_id)
                .date(day)
                .statuses(&[ReservationStatus::Pending, ReservationStatus::Confirmed]);
            Database::list_reservations(conn, &filter)
        };

        let today = active(date)?;
        let tomorrow = match date.checked_add_days(Days::new(1)) {
            Some(next) => active(next)?,
            None => Vec::new(),
        };

        let guests: u64 = today.iter().map(|r| u64::from(r.party_size())).sum();
        Ok(Self {
            restaurant_id,
            date,
            today,
            tomorrow,
            occupancy_percent: occupancy_percent(guests, capacity),
            capacity,
        })
    }
}

fn occupancy_percent(guests: u64, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    let percent = (guests * 100 / u64::from(capacity)).min(100);
    // Capped at 100 above
    u32::try_from(percent).unwrap_or(100)
}
