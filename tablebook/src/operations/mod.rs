//! Reservation operations using the plan-execute pattern.
//!
//! This module provides a plan-execute pattern for reservation operations,
//! separating planning from execution to enable dry-run mode, better testing,
//! and clear error messages.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Reads the current state, validates the request, builds a plan
//! 2. **Execution**: Opens one `BEGIN IMMEDIATE` transaction, re-checks what
//!    the plan relied on, and applies it
//!
//! A plan built from a read that another writer has since overtaken fails
//! with [`Error::Conflict`](crate::Error::Conflict) instead of double-booking.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use tablebook::operations::{BookingPlan, BookingRequest, PlanExecutor};
//! use tablebook::{Config, Database, DatabaseConfig, RestaurantId, UserId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//! let config = Config::default();
//! let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let request = BookingRequest::new(RestaurantId::new(1), UserId::new(7), date, "19:30", 4);
//!
//! // Generate plan
//! let plan = BookingPlan::new(request, &config).build_plan(db.connection()).unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! println!("{:?}", result.reservation);
//! ```

pub mod assign;
pub mod executor;
pub mod plan;
pub mod query;
pub mod reserve;
pub mod status;

pub use assign::{assign_table, unassign_table, AssignPlan, UnassignPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use query::{all_reservations, guest_reservations, restaurant_reservations, Dashboard};
pub use reserve::{create_reservation, BookingPlan, BookingRequest};
pub use status::{cancel_own_reservation, plan_guest_cancellation, set_status, Actor, StatusPlan};

pub use crate::seating::list_free_tables;
