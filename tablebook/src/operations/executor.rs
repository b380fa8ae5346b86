//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.
//!
//! All actions of a plan run inside one `BEGIN IMMEDIATE` transaction. Each
//! action re-reads the rows its plan was built from; if another writer
//! changed them in between, the transaction is rolled back and the plan
//! fails with [`Error::Conflict`]. Nothing is retried.

use rusqlite::Connection;

use crate::clock::{Clock, SystemClock};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::ReservationId;
use crate::reservation::{Reservation, ReservationStatus};
use crate::seating::AvailabilityQuery;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Number of rows inserted, updated or deleted.
    pub changes: usize,

    /// The reservation the plan touched, as stored after commit.
    ///
    /// Always `None` in dry-run mode.
    pub reservation: Option<Reservation>,
}

impl ExecutionResult {
    /// Creates a successful execution result.
    fn success(plan: &OperationPlan, changes: usize, reservation: Option<Reservation>) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            changes,
            reservation,
        }
    }

    /// Creates a dry-run execution result.
    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            changes: 0,
            reservation: None,
        }
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (validating without changes).
///
/// # Examples
///
/// ```
/// use tablebook::operations::{OperationPlan, PlanExecutor};
/// use tablebook::Database;
///
/// let mut db = Database::open_in_memory().unwrap();
/// let plan = OperationPlan::new("Nothing to do");
///
/// let result = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert_eq!(result.changes, 0);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    clock: &'a dyn Clock,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            clock: &SystemClock,
            dry_run: false,
        }
    }

    /// Stamps created reservations with `clock` instead of the system clock.
    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor describes the plan but does not
    /// open a transaction or modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails its re-check or its write. The
    /// whole plan is rolled back in that case.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(ExecutionResult::dry_run(plan));
        }

        let clock = self.clock;
        let tx = self.db.begin_transaction()?;

        let mut changes = 0;
        let mut touched = None;
        for action in &plan.actions {
            let (id, changed) = Self::execute_action(&tx, action, clock)?;
            touched = Some(id);
            changes += changed;
        }

        let reservation = match touched {
            Some(id) => Database::get_reservation(&tx, id)?,
            None => None,
        };

        // Dropping the transaction on any `?` above rolls it back
        tx.commit()?;
        log::info!("{} ({changes} rows changed)", plan.description);

        Ok(ExecutionResult::success(plan, changes, reservation))
    }

    /// Executes a single action, returning the reservation it touched and
    /// the number of rows it changed.
    fn execute_action(
        conn: &Connection,
        action: &PlanAction,
        clock: &dyn Clock,
    ) -> Result<(ReservationId, usize)> {
        match action {
            PlanAction::CreateReservation { draft, table_ids } => {
                let lost = AvailabilityQuery::new(draft.restaurant_id, draft.window)
                    .missing_from(conn, table_ids)?;
                if !lost.is_empty() {
                    log::debug!("tables {lost:?} were taken before commit");
                    return Err(Error::Conflict {
                        details: format!(
                            "tables were booked by another request for {}",
                            draft.window
                        ),
                        table_ids: lost,
                    });
                }

                let id = Database::insert_reservation(
                    conn,
                    draft,
                    ReservationStatus::Pending,
                    clock.timestamp(),
                )?;
                for table_id in table_ids {
                    Database::insert_assignment(conn, id, *table_id)?;
                }
                Ok((id, 1 + table_ids.len()))
            }
            PlanAction::AssignTable {
                restaurant_id,
                reservation_id,
                table_id,
                window,
            } => {
                let status = Self::current_status(conn, *reservation_id)?;
                if !status.is_active() {
                    return Err(Error::Conflict {
                        details: format!("reservation {reservation_id} became {status}"),
                        table_ids: Vec::new(),
                    });
                }

                let lost = AvailabilityQuery::new(*restaurant_id, *window)
                    .excluding_reservation(*reservation_id)
                    .missing_from(conn, &[*table_id])?;
                if !lost.is_empty() {
                    return Err(Error::Conflict {
                        details: format!("table {table_id} was booked by another request for {window}"),
                        table_ids: lost,
                    });
                }

                let inserted = Database::insert_assignment(conn, *reservation_id, *table_id)?;
                Ok((*reservation_id, usize::from(inserted)))
            }
            PlanAction::UnassignTable {
                reservation_id,
                table_id,
            } => {
                if !Database::delete_assignment(conn, *reservation_id, *table_id)? {
                    return Err(Error::AssignmentNotFound {
                        reservation_id: *reservation_id,
                        table_id: *table_id,
                    });
                }
                Ok((*reservation_id, 1))
            }
            PlanAction::SetStatus {
                reservation_id,
                from,
                to,
            } => {
                let current = Self::current_status(conn, *reservation_id)?;
                if current != *from {
                    return Err(Error::Conflict {
                        details: format!(
                            "reservation {reservation_id} changed from {from} to {current} concurrently"
                        ),
                        table_ids: Vec::new(),
                    });
                }

                Database::update_status(conn, *reservation_id, *to)?;
                let mut changed = 1;
                if to.releases_tables() {
                    let released = Database::delete_assignments_for(conn, *reservation_id)?;
                    log::debug!("released {released} tables of reservation {reservation_id}");
                    changed += released;
                }
                Ok((*reservation_id, changed))
            }
        }
    }

    fn current_status(conn: &Connection, id: ReservationId) -> Result<ReservationStatus> {
        Database::get_reservation_status(conn, id)?.ok_or(Error::ReservationNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::database::test_util::{at, create_test_database, insert_draft, seed_restaurant, seed_table};
    use crate::ids::{TableId, UserId};
    use crate::reservation::ReservationDraft;
    use crate::schedule::{ClockTime, TimeWindow};

    fn draft(restaurant: crate::ids::RestaurantId, hour: u32, party: u32) -> ReservationDraft {
        let start = at(2025, 6, 2, hour, 0);
        ReservationDraft {
            restaurant_id: restaurant,
            user_id: UserId::new(3),
            window: TimeWindow::starting_at(start, 90).unwrap(),
            time: ClockTime::from_naive_time(start.time()),
            party_size: party,
        }
    }

    #[test]
    fn test_execute_create_reservation() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let table = seed_table(db.connection(), restaurant, 4);

        let plan = OperationPlan::new("Book").add_action(PlanAction::CreateReservation {
            draft: draft(restaurant, 19, 4),
            table_ids: vec![table],
        });
        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();

        assert!(result.success);
        assert!(!result.dry_run);
        assert_eq!(result.changes, 2);
        let reservation = result.reservation.unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Pending);
        assert_eq!(reservation.table_ids(), &[table]);
    }

    #[test]
    fn test_created_at_comes_from_clock() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let table = seed_table(db.connection(), restaurant, 4);
        let clock = FixedClock(at(2025, 5, 30, 8, 15));

        let plan = OperationPlan::new("Book").add_action(PlanAction::CreateReservation {
            draft: draft(restaurant, 19, 4),
            table_ids: vec![table],
        });
        let result = PlanExecutor::new(&mut db)
            .with_clock(&clock)
            .execute(&plan)
            .unwrap();

        assert_eq!(result.reservation.unwrap().created_at(), clock.timestamp());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let table = seed_table(db.connection(), restaurant, 4);

        let plan = OperationPlan::new("Book").add_action(PlanAction::CreateReservation {
            draft: draft(restaurant, 19, 4),
            table_ids: vec![table],
        });
        let result = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.actions_taken.len(), 1);
        assert!(result.reservation.is_none());
        let all = Database::list_reservations(db.connection(), &Default::default()).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_stale_create_plan_conflicts_and_rolls_back() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let table = seed_table(db.connection(), restaurant, 4);

        let make_plan = || {
            OperationPlan::new("Book").add_action(PlanAction::CreateReservation {
                draft: draft(restaurant, 19, 4),
                table_ids: vec![table],
            })
        };
        let first = make_plan();
        let second = make_plan();

        PlanExecutor::new(&mut db).execute(&first).unwrap();
        let err = PlanExecutor::new(&mut db).execute(&second).unwrap_err();

        match err {
            Error::Conflict { table_ids, .. } => assert_eq!(table_ids, vec![table]),
            other => panic!("expected conflict, got {other:?}"),
        }
        let all = Database::list_reservations(db.connection(), &Default::default()).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_set_status_releases_tables() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let table = seed_table(db.connection(), restaurant, 4);
        let id = insert_draft(db.connection(), restaurant, at(2025, 6, 2, 19, 0), 90, 4);
        Database::insert_assignment(db.connection(), id, table).unwrap();

        let plan = OperationPlan::new("Reject").add_action(PlanAction::SetStatus {
            reservation_id: id,
            from: ReservationStatus::Pending,
            to: ReservationStatus::Rejected,
        });
        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();

        let reservation = result.reservation.unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Rejected);
        assert!(reservation.table_ids().is_empty());
        assert_eq!(result.changes, 2);
    }

    #[test]
    fn test_set_status_detects_concurrent_change() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let id = insert_draft(db.connection(), restaurant, at(2025, 6, 2, 19, 0), 90, 4);
        Database::update_status(db.connection(), id, ReservationStatus::Cancelled).unwrap();

        let plan = OperationPlan::new("Confirm").add_action(PlanAction::SetStatus {
            reservation_id: id,
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
        });
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_unassign_missing_pair() {
        let mut db = create_test_database();
        let restaurant = seed_restaurant(db.connection());
        let id = insert_draft(db.connection(), restaurant, at(2025, 6, 2, 19, 0), 90, 4);

        let plan = OperationPlan::new("Unassign").add_action(PlanAction::UnassignTable {
            reservation_id: id,
            table_id: TableId::new(77),
        });
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(matches!(err, Error::AssignmentNotFound { .. }));
    }

    #[test]
    fn test_empty_plan() {
        let mut db = create_test_database();
        let result = PlanExecutor::new(&mut db)
            .execute(&OperationPlan::new("Nothing"))
            .unwrap();
        assert!(result.success);
        assert!(result.reservation.is_none());
    }
}
