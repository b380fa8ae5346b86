//! Owner-driven table assignment.
//!
//! Unlike the booking path, an operator may put any free active table on a
//! reservation regardless of its seat count.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result, TableUnavailableReason};
use crate::ids::{ReservationId, RestaurantId, TableId};
use crate::reservation::Reservation;
use crate::seating::AvailabilityQuery;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Loads a reservation as seen by a restaurant operator.
///
/// Reservations of other restaurants are reported as not found.
fn scoped_reservation(conn: &Connection, restaurant_id: RestaurantId, id: ReservationId) -> Result<Reservation> {
    Database::get_reservation(conn, id)?
        .filter(|r| r.restaurant_id() == restaurant_id)
        .ok_or(Error::ReservationNotFound { id })
}

/// Plans adding one table to a reservation.
#[derive(Debug, Clone, Copy)]
pub struct AssignPlan {
    restaurant_id: RestaurantId,
    reservation_id: ReservationId,
    table_id: TableId,
}

impl AssignPlan {
    /// Creates a new assign planner.
    #[must_use]
    pub const fn new(restaurant_id: RestaurantId, reservation_id: ReservationId, table_id: TableId) -> Self {
        Self {
            restaurant_id,
            reservation_id,
            table_id,
        }
    }

    /// Builds the plan. An empty plan means the table is already assigned.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` / `TableNotFound` if either is missing or
    ///   belongs to another restaurant
    /// - `Forbidden` if the reservation is REJECTED or CANCELLED
    /// - `TableUnavailable` if the table is inactive or held by another
    ///   active reservation during the window
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = scoped_reservation(conn, self.restaurant_id, self.reservation_id)?;
        let table = Database::get_table(conn, self.table_id)?
            .filter(|t| t.restaurant_id == self.restaurant_id)
            .ok_or(Error::TableNotFound { id: self.table_id })?;

        let description = format!(
            "Assign table {} to reservation {}",
            self.table_id, self.reservation_id
        );

        if reservation.table_ids().contains(&self.table_id) {
            return Ok(OperationPlan::new(description)
                .add_warning(format!("table {} is already assigned", self.table_id)));
        }

        if !table.is_active {
            return Err(Error::TableUnavailable {
                table_id: self.table_id,
                reason: TableUnavailableReason::Inactive,
            });
        }
        if !reservation.is_active() {
            return Err(Error::Forbidden {
                reason: format!(
                    "reservation {} is {} and cannot hold tables",
                    self.reservation_id,
                    reservation.status()
                ),
            });
        }

        let window = reservation.window();
        let taken = AvailabilityQuery::new(self.restaurant_id, window)
            .excluding_reservation(self.reservation_id)
            .missing_from(conn, &[self.table_id])?;
        if !taken.is_empty() {
            return Err(Error::TableUnavailable {
                table_id: self.table_id,
                reason: TableUnavailableReason::Occupied,
            });
        }

        let mut plan = OperationPlan::new(description);
        if table.seats < reservation.party_size() {
            plan = plan.add_warning(format!(
                "table {} seats {} for a party of {}",
                self.table_id,
                table.seats,
                reservation.party_size()
            ));
        }

        Ok(plan.add_action(PlanAction::AssignTable {
            restaurant_id: self.restaurant_id,
            reservation_id: self.reservation_id,
            table_id: self.table_id,
            window,
        }))
    }
}

/// Plans removing one table from a reservation.
#[derive(Debug, Clone, Copy)]
pub struct UnassignPlan {
    restaurant_id: RestaurantId,
    reservation_id: ReservationId,
    table_id: TableId,
}

impl UnassignPlan {
    /// Creates a new unassign planner.
    #[must_use]
    pub const fn new(restaurant_id: RestaurantId, reservation_id: ReservationId, table_id: TableId) -> Self {
        Self {
            restaurant_id,
            reservation_id,
            table_id,
        }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation is missing or belongs to
    ///   another restaurant
    /// - `AssignmentNotFound` if the table is not on the reservation
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = scoped_reservation(conn, self.restaurant_id, self.reservation_id)?;
        if !reservation.table_ids().contains(&self.table_id) {
            return Err(Error::AssignmentNotFound {
                reservation_id: self.reservation_id,
                table_id: self.table_id,
            });
        }

        Ok(OperationPlan::new(format!(
            "Remove table {} from reservation {}",
            self.table_id, self.reservation_id
        ))
        .add_action(PlanAction::UnassignTable {
            reservation_id: self.reservation_id,
            table_id: self.table_id,
        }))
    }
}

/// Puts a table on a reservation.
///
/// Returns `false` when the table was already assigned.
///
/// # Errors
///
/// Returns any planning error (see [`AssignPlan::build_plan`]), or
/// `Conflict` if the table was taken before commit.
pub fn assign_table(
    db: &mut Database,
    restaurant_id: RestaurantId,
    reservation_id: ReservationId,
    table_id: TableId,
) -> Result<bool> {
    let plan = AssignPlan::new(restaurant_id, reservation_id, table_id).build_plan(db.connection())?;
    if plan.is_empty() {
        return Ok(false);
    }
    let result = PlanExecutor::new(db).execute(&plan)?;
    Ok(result.changes > 0)
}

/// Takes a table off a reservation.
///
/// # Errors
///
/// Returns any planning error (see [`UnassignPlan::build_plan`]); a pair
/// removed concurrently is reported as `AssignmentNotFound`.
pub fn unassign_table(
    db: &mut Database,
    restaurant_id: RestaurantId,
    reservation_id: ReservationId,
    table_id: TableId,
) -> Result<()> {
    let plan = UnassignPlan::new(restaurant_id, reservation_id, table_id).build_plan(db.connection())?;
    PlanExecutor::new(db).execute(&plan)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{at, create_test_database, insert_draft, seed_restaurant, seed_table};
    use crate::reservation::ReservationStatus;
    use crate::restaurant::NewTable;

    #[test]
    fn test_assign_ignores_seat_count() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let two = seed_table(conn, rest, 2);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 6);

        let plan = AssignPlan::new(rest, id, two).build_plan(db.connection()).unwrap();
        assert_eq!(plan.warnings.len(), 1);

        assert!(assign_table(&mut db, rest, id, two).unwrap());
        let stored = Database::get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.table_ids(), &[two]);
    }

    #[test]
    fn test_assign_twice_is_noop() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let table = seed_table(conn, rest, 4);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);

        assert!(assign_table(&mut db, rest, id, table).unwrap());
        assert!(!assign_table(&mut db, rest, id, table).unwrap());
    }

    #[test]
    fn test_assign_rejects_foreign_records() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let other = seed_restaurant(conn);
        let foreign_table = seed_table(conn, other, 4);
        let own_table = seed_table(conn, rest, 4);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);

        let err = assign_table(&mut db, rest, id, foreign_table).unwrap_err();
        assert!(matches!(err, Error::TableNotFound { .. }));

        let err = assign_table(&mut db, other, id, foreign_table).unwrap_err();
        assert!(matches!(err, Error::ReservationNotFound { .. }));

        let err = assign_table(&mut db, rest, ReservationId::new(404), own_table).unwrap_err();
        assert!(matches!(err, Error::ReservationNotFound { .. }));
    }

    #[test]
    fn test_assign_inactive_or_occupied() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let off = Database::insert_table(
            conn,
            &NewTable {
                restaurant_id: rest,
                name: Some("Patio".into()),
                seats: 4,
                is_active: false,
            },
        )
        .unwrap();
        let busy = seed_table(conn, rest, 4);
        let holder = insert_draft(conn, rest, at(2025, 6, 2, 18, 0), 120, 4);
        Database::insert_assignment(conn, holder, busy).unwrap();
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);

        let err = assign_table(&mut db, rest, id, off).unwrap_err();
        assert!(matches!(
            err,
            Error::TableUnavailable {
                reason: TableUnavailableReason::Inactive,
                ..
            }
        ));

        let err = assign_table(&mut db, rest, id, busy).unwrap_err();
        assert!(matches!(
            err,
            Error::TableUnavailable {
                reason: TableUnavailableReason::Occupied,
                ..
            }
        ));
    }

    #[test]
    fn test_assign_to_terminal_reservation_forbidden() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let table = seed_table(conn, rest, 4);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);
        Database::update_status(conn, id, ReservationStatus::Cancelled).unwrap();

        let err = assign_table(&mut db, rest, id, table).unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_unassign_then_unassign_again() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let table = seed_table(conn, rest, 4);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);
        Database::insert_assignment(conn, id, table).unwrap();

        unassign_table(&mut db, rest, id, table).unwrap();
        let err = unassign_table(&mut db, rest, id, table).unwrap_err();
        assert!(matches!(err, Error::AssignmentNotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unassign_other_restaurant() {
        let mut db = create_test_database();
        let conn = db.connection();
        let rest = seed_restaurant(conn);
        let other = seed_restaurant(conn);
        let table = seed_table(conn, rest, 4);
        let id = insert_draft(conn, rest, at(2025, 6, 2, 19, 0), 90, 4);
        Database::insert_assignment(conn, id, table).unwrap();

        let err = unassign_table(&mut db, other, id, table).unwrap_err();
        assert!(matches!(err, Error::ReservationNotFound { .. }));
    }
}
