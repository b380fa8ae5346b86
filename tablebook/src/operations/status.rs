//! Reservation lifecycle changes.
//!
//! Status edges follow [`ReservationStatus::can_transition_to`]. Entering a
//! terminal status releases every table of the reservation in the same
//! transaction as the status update.

use rusqlite::Connection;

use crate::clock::{Clock, SystemClock};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{ReservationId, RestaurantId, UserId};
use crate::reservation::{Reservation, ReservationStatus};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};
use super::reserve::committed;

/// Who is asking for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// An operator acting for one restaurant.
    Restaurant(RestaurantId),
    /// A guest acting on their own bookings.
    Guest(UserId),
    /// A global administrator.
    Administrator,
}

/// Plans a status change.
///
/// # Examples
///
/// ```
/// use tablebook::operations::{Actor, StatusPlan};
/// use tablebook::{Database, ReservationId, ReservationStatus};
///
/// let db = Database::open_in_memory().unwrap();
/// let err = StatusPlan::new(ReservationId::new(1), ReservationStatus::Confirmed, Actor::Administrator)
///     .build_plan(db.connection())
///     .unwrap_err();
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatusPlan {
    reservation_id: ReservationId,
    target: ReservationStatus,
    actor: Actor,
}

impl StatusPlan {
    /// Creates a new status planner.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, target: ReservationStatus, actor: Actor) -> Self {
        Self {
            reservation_id,
            target,
            actor,
        }
    }

    /// Builds the plan, judging guest cancellations against the system clock.
    ///
    /// # Errors
    ///
    /// See [`StatusPlan::build_plan_at`].
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        self.build_plan_at(conn, &SystemClock)
    }

    /// Builds the plan with `clock` as "now".
    ///
    /// A guest goes through the same rules as [`plan_guest_cancellation`].
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation does not exist, or belongs
    ///   to another restaurant than a restaurant operator's
    /// - `InvalidTransition` if the edge is not in the status graph
    /// - `Forbidden` for a guest asking for anything but cancelling their
    ///   own PENDING reservation before it starts
    pub fn build_plan_at(&self, conn: &Connection, clock: &dyn Clock) -> Result<OperationPlan> {
        let reservation = Database::get_reservation(conn, self.reservation_id)?.ok_or(
            Error::ReservationNotFound {
                id: self.reservation_id,
            },
        )?;

        match self.actor {
            Actor::Restaurant(restaurant) if reservation.restaurant_id() != restaurant => {
                return Err(Error::ReservationNotFound {
                    id: self.reservation_id,
                });
            }
            Actor::Guest(user) => {
                if self.target != ReservationStatus::Cancelled {
                    return Err(Error::Forbidden {
                        reason: format!("guests may only cancel, not set {}", self.target),
                    });
                }
                return guest_cancellation(&reservation, user, clock);
            }
            _ => {}
        }

        let from = reservation.status();
        if !from.can_transition_to(self.target) {
            return Err(Error::InvalidTransition {
                from,
                to: self.target,
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Set reservation {} to {}",
            self.reservation_id, self.target
        ));
        if self.target.releases_tables() && !reservation.table_ids().is_empty() {
            plan = plan.add_warning(format!(
                "{} tables will be released",
                reservation.table_ids().len()
            ));
        }

        Ok(plan.add_action(PlanAction::SetStatus {
            reservation_id: self.reservation_id,
            from,
            to: self.target,
        }))
    }
}

/// Moves a reservation to a new status.
///
/// # Errors
///
/// Returns any planning error (see [`StatusPlan::build_plan`]), or
/// `Conflict` if the status changed concurrently.
pub fn set_status(
    db: &mut Database,
    reservation_id: ReservationId,
    target: ReservationStatus,
    actor: Actor,
) -> Result<Reservation> {
    let plan = StatusPlan::new(reservation_id, target, actor).build_plan(db.connection())?;
    committed(PlanExecutor::new(db).execute(&plan)?.reservation)
}

/// Plans a guest cancelling their own booking.
///
/// Only a PENDING reservation whose start lies strictly after `now` can be
/// cancelled by the guest; everything else is `Forbidden`.
///
/// # Errors
///
/// - `ReservationNotFound` if the reservation does not exist
/// - `Forbidden` if the guest does not own it, it is not PENDING, or it
///   has already started
pub fn plan_guest_cancellation(
    conn: &Connection,
    reservation_id: ReservationId,
    requester: UserId,
    clock: &dyn Clock,
) -> Result<OperationPlan> {
    let reservation = Database::get_reservation(conn, reservation_id)?
        .ok_or(Error::ReservationNotFound { id: reservation_id })?;
    guest_cancellation(&reservation, requester, clock)
}

fn guest_cancellation(
    reservation: &Reservation,
    requester: UserId,
    clock: &dyn Clock,
) -> Result<OperationPlan> {
    let reservation_id = reservation.id();
    let forbidden = |reason: String| Err(Error::Forbidden { reason });
    if reservation.user_id() != requester {
        return forbidden(format!("reservation {reservation_id} belongs to another guest"));
    }
    if reservation.status() != ReservationStatus::Pending {
        return forbidden(format!(
            "only pending reservations can be cancelled, this one is {}",
            reservation.status()
        ));
    }
    if reservation.window().start() <= clock.now() {
        return forbidden(format!(
            "reservation {reservation_id} started at {}",
            reservation.window().start()
        ));
    }

    Ok(
        OperationPlan::new(format!("Cancel reservation {reservation_id} for guest {requester}"))
            .add_action(PlanAction::SetStatus {
                reservation_id,
                from: ReservationStatus::Pending,
                to: ReservationStatus::Cancelled,
            }),
    )
}

/// Cancels a guest's own pending reservation.
///
/// # Errors
///
/// See [`plan_guest_cancellation`]; additionally `Conflict` if the status
/// changed concurrently.
pub fn cancel_own_reservation(
    db: &mut Database,
    reservation_id: ReservationId,
    requester: UserId,
    clock: &dyn Clock,
) -> Result<Reservation> {
    let plan = plan_guest_cancellation(db.connection(), reservation_id, requester, clock)?;
    committed(PlanExecutor::new(db).execute(&plan)?.reservation)
}
