//! Shared test utilities for unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use std::time::SystemTime;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::ids::{ReservationId, RestaurantId, TableId, UserId};
use crate::reservation::{ReservationDraft, ReservationStatus};
use crate::restaurant::{NewRestaurant, NewTable};
use crate::schedule::{ClockTime, OpeningHours, TimeWindow};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a local instant.
///
/// # Panics
///
/// Panics on an invalid date or time.
#[must_use]
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Inserts "Test Bistro", open every day from 09:00 to 23:00.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn seed_restaurant(conn: &Connection) -> RestaurantId {
    let hours = OpeningHours::every_day(
        ClockTime::parse("09:00").unwrap(),
        ClockTime::parse("23:00").unwrap(),
    );
    Database::insert_restaurant(
        conn,
        &NewRestaurant {
            name: "Test Bistro".into(),
            capacity: None,
            opening_hours: hours,
        },
    )
    .unwrap()
}

/// Inserts an active table.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn seed_table(conn: &Connection, restaurant: RestaurantId, seats: u32) -> TableId {
    Database::insert_table(
        conn,
        &NewTable {
            restaurant_id: restaurant,
            name: None,
            seats,
            is_active: true,
        },
    )
    .unwrap()
}

/// Inserts a PENDING reservation for user 1 without any tables.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn insert_draft(
    conn: &Connection,
    restaurant: RestaurantId,
    start: NaiveDateTime,
    duration_minutes: u32,
    party_size: u32,
) -> ReservationId {
    let draft = ReservationDraft {
        restaurant_id: restaurant,
        user_id: UserId::new(1),
        window: TimeWindow::starting_at(start, duration_minutes).unwrap(),
        time: ClockTime::from_naive_time(start.time()),
        party_size,
    };
    Database::insert_reservation(conn, &draft, ReservationStatus::Pending, SystemTime::now())
        .unwrap()
}
