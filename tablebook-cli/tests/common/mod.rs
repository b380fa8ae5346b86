//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - A small restaurant catalog fixture

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A future day every fixture restaurant is open on.
#[allow(dead_code)]
pub const BOOKING_DATE: &str = "2030-06-03";

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the tablebook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory path is not created yet; tablebook creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("tablebook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        cmd.env_remove("TABLEBOOK_DATA_DIR")
            .env_remove("TABLEBOOK_USER")
            .env_remove("TABLEBOOK_OUTPUT_FORMAT")
            .env_remove("TABLEBOOK_DEFAULT_DURATION_MINUTES")
            .env_remove("TABLEBOOK_DISABLE_AUTOINIT");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Import one restaurant open 09:00-22:00 every day with tables of the
    /// given sizes. Returns the restaurant id and its table ids in order.
    pub fn restaurant_with_tables(&self, seats: &[u32]) -> (i64, Vec<i64>) {
        let catalog = self.write_file("catalog.yaml", &catalog_yaml("Harbour Grill", seats));
        let output = self
            .command()
            .arg("import")
            .arg(&catalog)
            .output()
            .expect("Failed to run import");
        assert!(
            output.status.success(),
            "Import failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        let line = stdout.lines().next().expect("import printed nothing");
        let fields: Vec<&str> = line.split('\t').collect();
        (fields[0].parse().unwrap(), parse_ids(fields[2]))
    }

    /// Book at `time` on [`BOOKING_DATE`] and return the reservation id and
    /// its tables.
    pub fn book(&self, restaurant: i64, user: i64, time: &str, party: u32) -> (i64, Vec<i64>) {
        let output = self
            .command()
            .args(["book", "--date", BOOKING_DATE, "--time", time])
            .arg("--restaurant")
            .arg(restaurant.to_string())
            .arg("--user")
            .arg(user.to_string())
            .arg("--party")
            .arg(party.to_string())
            .output()
            .expect("Failed to run book");
        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_booking(&String::from_utf8(output.stdout).unwrap())
    }
}

/// Catalog with one restaurant open 09:00-22:00 every day.
#[allow(dead_code)]
pub fn catalog_yaml(name: &str, seats: &[u32]) -> String {
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
    format!("restaurants:\n  - name: {name}\n    opening_hours:\n{days}    tables:\n{tables}")
}

/// Parse a comma separated id list, e.g. `3,7`.
#[allow(dead_code)]
pub fn parse_ids(text: &str) -> Vec<i64> {
    text.trim()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("id is not a number"))
        .collect()
}

/// Parse the `<id>\t<tables>` line printed by `book` and `assign`.
#[allow(dead_code)]
pub fn parse_booking(stdout: &str) -> (i64, Vec<i64>) {
    let line = stdout.trim();
    let (id, tables) = line.split_once('\t').unwrap_or((line, ""));
    (id.parse().expect("reservation id is not a number"), parse_ids(tables))
}
