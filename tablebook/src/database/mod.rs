//! Database layer for persistent storage of restaurants, tables and
//! reservations.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, and CRUD operations.
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::database::{Database, DatabaseConfig, ReservationFilter};
//! use tablebook::RestaurantId;
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/tablebook.db");
//! let db = Database::open(config).unwrap();
//!
//! // List a restaurant's reservations
//! let filter = ReservationFilter::new().restaurant(RestaurantId::new(1));
//! for reservation in Database::list_reservations(db.connection(), &filter).unwrap() {
//!     println!("{:?}", reservation);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use operations::ReservationFilter;

pub(crate) use operations::naive_to_secs;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
