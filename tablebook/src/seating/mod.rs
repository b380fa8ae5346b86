//! Table availability and combination search.
//!
//! [`AvailabilityQuery`] answers which tables are free for a window;
//! [`TableAssignmentSolver`] picks the cheapest group of them for a party.

mod availability;
mod solver;

#[cfg(test)]
mod proptests;

pub use availability::{list_free_tables, AvailabilityQuery};
pub use solver::{SeatingChoice, TableAssignmentSolver, MAX_TABLES_PER_PARTY};
