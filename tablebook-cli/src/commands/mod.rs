//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory and database
//! - `import`: Load restaurants and tables from a catalog
//! - `free_tables`: List free tables for a window
//! - `book`: Book a table
//! - `set_status`: Change a reservation's status as operator or administrator
//! - `cancel`: Cancel a guest's own pending reservation
//! - `assign`: Add or remove tables on a reservation
//! - `list`: List reservations
//! - `dashboard`: Today's and tomorrow's bookings for a restaurant
//! - `completions`: Generate shell completion scripts

pub mod assign;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod dashboard;
pub mod free_tables;
pub mod import;
pub mod init;
pub mod list;
pub mod set_status;

pub use assign::{AssignCommand, UnassignCommand};
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use dashboard::DashboardCommand;
pub use free_tables::FreeTablesCommand;
pub use import::ImportCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use set_status::SetStatusCommand;
