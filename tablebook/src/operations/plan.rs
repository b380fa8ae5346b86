//! Plan types for reservation operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use crate::ids::{ReservationId, RestaurantId, TableId};
use crate::reservation::{ReservationDraft, ReservationStatus};
use crate::schedule::TimeWindow;

/// A single action to be taken during plan execution.
///
/// Each action carries what the executor needs to re-check its
/// preconditions inside the commit transaction, since the plan was built
/// from a read that other writers may have overtaken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a PENDING reservation holding the given tables.
    CreateReservation {
        /// Validated reservation fields.
        draft: ReservationDraft,
        /// Tables to hold; all must still be free at commit.
        table_ids: Vec<TableId>,
    },

    /// Add one table to an existing reservation.
    AssignTable {
        /// Restaurant both records belong to.
        restaurant_id: RestaurantId,
        /// Reservation gaining the table.
        reservation_id: ReservationId,
        /// Table to add.
        table_id: TableId,
        /// The reservation's window.
        window: TimeWindow,
    },

    /// Remove one table from a reservation.
    UnassignTable {
        /// Reservation losing the table.
        reservation_id: ReservationId,
        /// Table to remove.
        table_id: TableId,
    },

    /// Move a reservation along the status graph.
    SetStatus {
        /// Reservation to update.
        reservation_id: ReservationId,
        /// Status observed while planning.
        from: ReservationStatus,
        /// New status.
        to: ReservationStatus,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation { draft, table_ids } => {
                format!(
                    "Create reservation for {} guests at restaurant {} ({}) on tables {}",
                    draft.party_size,
                    draft.restaurant_id,
                    draft.window,
                    join_ids(table_ids)
                )
            }
            Self::AssignTable {
                reservation_id,
                table_id,
                ..
            } => format!("Assign table {table_id} to reservation {reservation_id}"),
            Self::UnassignTable {
                reservation_id,
                table_id,
            } => format!("Remove table {table_id} from reservation {reservation_id}"),
            Self::SetStatus {
                reservation_id,
                from,
                to,
            } => {
                if to.releases_tables() {
                    format!("Change reservation {reservation_id} from {from} to {to} and release its tables")
                } else {
                    format!("Change reservation {reservation_id} from {from} to {to}")
                }
            }
        }
    }
}

fn join_ids(ids: &[TableId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book a table");
    /// assert_eq!(plan.description, "Book a table");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::operations::{OperationPlan, PlanAction};
    /// use tablebook::{ReservationId, TableId};
    ///
    /// let plan = OperationPlan::new("Test").add_action(PlanAction::UnassignTable {
    ///     reservation_id: ReservationId::new(1),
    ///     table_id: TableId::new(2),
    /// });
    ///
    /// assert_eq!(plan.actions.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_warning("This is a warning");
    ///
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::at;
    use crate::ids::UserId;
    use crate::schedule::ClockTime;

    fn draft() -> ReservationDraft {
        let start = at(2025, 6, 2, 19, 0);
        ReservationDraft {
            restaurant_id: RestaurantId::new(1),
            user_id: UserId::new(5),
            window: TimeWindow::starting_at(start, 90).unwrap(),
            time: ClockTime::from_naive_time(start.time()),
            party_size: 5,
        }
    }

    #[test]
    fn test_create_description_lists_tables() {
        let action = PlanAction::CreateReservation {
            draft: draft(),
            table_ids: vec![TableId::new(3), TableId::new(4)],
        };
        let desc = action.description();
        assert!(desc.contains("5 guests"));
        assert!(desc.contains("tables 3, 4"));
    }

    #[test]
    fn test_status_description_mentions_release() {
        let cancel = PlanAction::SetStatus {
            reservation_id: ReservationId::new(1),
            from: ReservationStatus::Pending,
            to: ReservationStatus::Cancelled,
        };
        assert!(cancel.description().contains("release"));

        let confirm = PlanAction::SetStatus {
            reservation_id: ReservationId::new(1),
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
        };
        assert!(!confirm.description().contains("release"));
    }

    #[test]
    fn test_operation_plan_builder_pattern() {
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateReservation {
                draft: draft(),
                table_ids: vec![TableId::new(1)],
            })
            .add_warning("Warning 1")
            .add_warning("Warning 2")
            .add_action(PlanAction::UnassignTable {
                reservation_id: ReservationId::new(1),
                table_id: TableId::new(1),
            });

        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
        assert_eq!(plan.warnings, vec!["Warning 1", "Warning 2"]);
    }
}
