//! Booking operation planning.
//!
//! This module turns a guest's booking request into a plan: the slot is
//! checked against opening hours, then either the explicitly requested table
//! is vetted or the solver picks the least wasteful set of free tables.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result, TableUnavailableReason};
use crate::ids::{RestaurantId, TableId, UserId};
use crate::reservation::{validate_party_size, Reservation, ReservationDraft};
use crate::restaurant::Restaurant;
use crate::schedule::OpeningHoursValidator;
use crate::seating::{AvailabilityQuery, TableAssignmentSolver, MAX_TABLES_PER_PARTY};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// A guest's request for a table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::operations::BookingRequest;
/// use tablebook::{RestaurantId, UserId};
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let request = BookingRequest::new(RestaurantId::new(1), UserId::new(7), date, "19:00", 4)
///     .with_duration(Some(120));
/// assert_eq!(request.duration_minutes, Some(120));
/// assert!(request.table_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Restaurant to book.
    pub restaurant_id: RestaurantId,
    /// Guest making the booking.
    pub user_id: UserId,
    /// Calendar date of the visit.
    pub date: NaiveDate,
    /// Requested start time, `H:mm` or `HH:mm`.
    pub time: String,
    /// Number of guests.
    pub party_size: u32,
    /// Duration override. The configured default applies when `None`.
    pub duration_minutes: Option<u32>,
    /// A specific table the guest asked for.
    pub table_id: Option<TableId>,
}

impl BookingRequest {
    /// Creates a request with the default duration and automatic seating.
    #[must_use]
    pub fn new(
        restaurant_id: RestaurantId,
        user_id: UserId,
        date: NaiveDate,
        time: impl Into<String>,
        party_size: u32,
    ) -> Self {
        Self {
            restaurant_id,
            user_id,
            date,
            time: time.into(),
            party_size,
            duration_minutes: None,
            table_id: None,
        }
    }

    /// Sets the duration override.
    #[must_use]
    pub const fn with_duration(mut self, minutes: Option<u32>) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Asks for a specific table instead of automatic seating.
    #[must_use]
    pub const fn with_table(mut self, table_id: Option<TableId>) -> Self {
        self.table_id = table_id;
        self
    }
}

/// Plans a booking.
///
/// The plan is built from an optimistic read; the executor re-checks the
/// chosen tables inside its transaction.
pub struct BookingPlan<'a> {
    request: BookingRequest,
    config: &'a Config,
}

impl<'a> BookingPlan<'a> {
    /// Creates a new booking planner.
    #[must_use]
    pub const fn new(request: BookingRequest, config: &'a Config) -> Self {
        Self { request, config }
    }

    /// Builds the plan for the request.
    ///
    /// # Errors
    ///
    /// - `RestaurantNotFound` if the restaurant does not exist
    /// - `Validation` for a zero party size or a malformed time
    /// - any opening-hours failure, unchanged
    /// - `TableNotFound` or `TableUnavailable` for a rejected explicit table
    /// - `NoFit` if no group of at most three free tables seats the party
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;
        let restaurant = Database::get_restaurant(conn, request.restaurant_id)?.ok_or(
            Error::RestaurantNotFound {
                id: request.restaurant_id,
            },
        )?;

        validate_party_size(request.party_size)?;

        let duration = request
            .duration_minutes
            .unwrap_or_else(|| self.config.duration_minutes());
        let slot =
            OpeningHoursValidator::validate(&restaurant.opening_hours, request.date, &request.time, duration)?;
        let draft = ReservationDraft::new(restaurant.id, request.user_id, &slot, request.party_size)?;

        let table_ids = match request.table_id {
            Some(table_id) => {
                self.check_explicit_table(conn, &restaurant, &draft, table_id)?;
                vec![table_id]
            }
            None => {
                let free = AvailabilityQuery::new(restaurant.id, draft.window).run(conn)?;
                log::debug!(
                    "{} free tables at restaurant {} for {}",
                    free.len(),
                    restaurant.id,
                    draft.window
                );
                let choice = TableAssignmentSolver::solve(&free, request.party_size).ok_or(Error::NoFit {
                    party_size: request.party_size,
                    max_tables: MAX_TABLES_PER_PARTY,
                })?;
                choice.table_ids
            }
        };

        let mut plan = OperationPlan::new(format!(
            "Book {} guests at {} for {}",
            request.party_size, restaurant.name, draft.window
        ));
        if table_ids.len() > 1 {
            plan = plan.add_warning(format!("party is split across {} tables", table_ids.len()));
        }

        Ok(plan.add_action(PlanAction::CreateReservation { draft, table_ids }))
    }

    fn check_explicit_table(
        &self,
        conn: &Connection,
        restaurant: &Restaurant,
        draft: &ReservationDraft,
        table_id: TableId,
    ) -> Result<()> {
        let table = Database::get_table(conn, table_id)?.ok_or(Error::TableNotFound { id: table_id })?;

        let unavailable = |reason| Error::TableUnavailable { table_id, reason };
        if table.restaurant_id != restaurant.id {
            return Err(unavailable(TableUnavailableReason::WrongRestaurant));
        }
        if !table.is_active {
            return Err(unavailable(TableUnavailableReason::Inactive));
        }
        if table.seats != self.request.party_size {
            return Err(unavailable(TableUnavailableReason::SeatMismatch {
                seats: table.seats,
                party_size: self.request.party_size,
            }));
        }

        let taken = AvailabilityQuery::new(restaurant.id, draft.window).missing_from(conn, &[table_id])?;
        if !taken.is_empty() {
            return Err(unavailable(TableUnavailableReason::Occupied));
        }
        Ok(())
    }
}

/// Books a table: plans the request and commits it.
///
/// # Errors
///
/// Returns any planning error (see [`BookingPlan::build_plan`]), or
/// `Conflict` if another booking took a chosen table before commit.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::catalog::Catalog;
/// use tablebook::operations::{create_reservation, BookingRequest};
/// use tablebook::{Config, Database, ReservationStatus, UserId};
///
/// let mut db = Database::open_in_memory().unwrap();
/// let catalog = Catalog::from_yaml_str(
///     "restaurants:
///   - name: Corner
///     opening_hours:
///       monday: { open: '09:00', close: '22:00' }
///     tables:
///       - { seats: 2 }
///       - { seats: 4 }
/// ",
/// )
/// .unwrap();
/// let imported = db.import_catalog(&catalog).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let request = BookingRequest::new(imported[0].id, UserId::new(1), date, "19:00", 3);
/// let reservation = create_reservation(&mut db, &request, &Config::default()).unwrap();
///
/// assert_eq!(reservation.status(), ReservationStatus::Pending);
/// assert_eq!(reservation.table_ids(), &imported[0].table_ids[1..]);
/// ```
pub fn create_reservation(db: &mut Database, request: &BookingRequest, config: &Config) -> Result<Reservation> {
    let plan = BookingPlan::new(request.clone(), config).build_plan(db.connection())?;
    committed(PlanExecutor::new(db).execute(&plan)?.reservation)
}

/// Unwraps the reservation a committed plan reports.
pub(super) fn committed(reservation: Option<Reservation>) -> Result<Reservation> {
    reservation.ok_or_else(|| Error::DatabaseCorruption {
        details: "committed reservation could not be read back".into(),
    })
}
