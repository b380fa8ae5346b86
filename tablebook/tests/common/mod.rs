//! Common test utilities for integration tests.
//!
//! This module provides helpers for building a file-backed database with a
//! small restaurant in it.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tablebook::catalog::Catalog;
use tablebook::database::{Database, DatabaseConfig};
use tablebook::{RestaurantId, TableId};

/// A database file in a temporary directory.
///
/// The directory lives as long as the fixture.
pub struct TestStore {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TestStore {
    /// Creates an initialized, empty database file.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablebook.db");
        drop(Database::open(DatabaseConfig::new(&path)).unwrap());
        Self { _dir: dir, path }
    }

    /// Path of the database file.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the store.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }

    /// Imports one restaurant open 09:00-22:00 every day with tables of the
    /// given sizes, returning its id and the table ids in order.
    pub fn restaurant_with_tables(&self, seats: &[u32]) -> (RestaurantId, Vec<TableId>) {
        let tables: String = seats
            .iter()
            .map(|s| format!("      - {{ seats: {s} }}\n"))
            .collect();
        let days: String = [
            "sunday",
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
        ]
        .iter()
        .map(|d| format!("      {d}: {{ open: '09:00', close: '22:00' }}\n"))
        .collect();
        let yaml = format!("restaurants:\n  - name: Harbour Grill\n    opening_hours:\n{days}    tables:\n{tables}");

        let catalog = Catalog::from_yaml_str(&yaml).unwrap();
        let imported = self.open().import_catalog(&catalog).unwrap();
        let restaurant = imported.into_iter().next().unwrap();
        (restaurant.id, restaurant.table_ids)
    }
}

/// A Monday.
#[allow(dead_code)]
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// A local instant on [`monday`].
#[allow(dead_code)]
pub fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    monday().and_hms_opt(hour, minute, 0).unwrap()
}
