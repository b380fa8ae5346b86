//! Assign and unassign command implementations.
//!
//! Restaurant operators add tables to a reservation or take them off.

use crate::error::CliError;
use crate::utils::{
    join_ids, load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions,
};
use clap::Args;
use tablebook::operations::{AssignPlan, OperationPlan, UnassignPlan};
use tablebook::{PlanExecutor, ReservationId, RestaurantId, TableId};

/// Add a table to a reservation.
#[derive(Args)]
pub struct AssignCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION")]
    pub reservation: i64,

    /// Table id
    #[arg(value_name = "TABLE")]
    pub table: i64,

    /// Act as the operator of this restaurant
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

/// Remove a table from a reservation.
#[derive(Args)]
pub struct UnassignCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION")]
    pub reservation: i64,

    /// Table id
    #[arg(value_name = "TABLE")]
    pub table: i64,

    /// Act as the operator of this restaurant
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl AssignCommand {
    /// Execute the assign command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let plan = AssignPlan::new(
            RestaurantId::new(self.restaurant),
            ReservationId::new(self.reservation),
            TableId::new(self.table),
        )
        .build_plan(db.connection())?;

        run_table_plan(db, &plan, self.dry_run, global)
    }
}

impl UnassignCommand {
    /// Execute the unassign command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let plan = UnassignPlan::new(
            RestaurantId::new(self.restaurant),
            ReservationId::new(self.reservation),
            TableId::new(self.table),
        )
        .build_plan(db.connection())?;

        run_table_plan(db, &plan, self.dry_run, global)
    }
}

/// Executes an assign or unassign plan and prints the reservation's tables.
fn run_table_plan(
    mut db: tablebook::Database,
    plan: &OperationPlan,
    dry_run: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    if dry_run {
        print_dry_run(plan, global);
        return Ok(());
    }

    // An already-assigned table plans nothing
    if plan.is_empty() {
        print_warnings(&plan.warnings, global);
        return Ok(());
    }

    let result = PlanExecutor::new(&mut db).execute(plan)?;
    if let Some(reservation) = result.reservation {
        println!("{}\t{}", reservation.id(), join_ids(reservation.table_ids()));
    }
    print_warnings(&result.warnings, global);

    Ok(())
}
