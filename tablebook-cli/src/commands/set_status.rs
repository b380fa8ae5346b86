//! Set-status command implementation.
//!
//! Moves a reservation along the status graph on behalf of a restaurant
//! operator or an administrator.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions};
use clap::Args;
use tablebook::operations::StatusPlan;
use tablebook::{Actor, PlanExecutor, ReservationId, ReservationStatus, RestaurantId};

/// Change the status of a reservation.
#[derive(Args)]
pub struct SetStatusCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION")]
    pub reservation: i64,

    /// Target status (CONFIRMED, REJECTED or CANCELLED)
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Act as the operator of this restaurant
    #[arg(long, value_name = "ID", required_unless_present = "admin", conflicts_with = "admin")]
    pub restaurant: Option<i64>,

    /// Act as an administrator
    #[arg(long)]
    pub admin: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl SetStatusCommand {
    /// Execute the set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let target: ReservationStatus = self.status.parse()?;
        let actor = match self.restaurant {
            Some(id) => Actor::Restaurant(RestaurantId::new(id)),
            None if self.admin => Actor::Administrator,
            None => {
                return Err(CliError::InvalidArguments(
                    "either --restaurant or --admin is required".to_string(),
                ))
            }
        };

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = StatusPlan::new(ReservationId::new(self.reservation), target, actor)
            .build_plan(db.connection())?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        if let Some(reservation) = result.reservation {
            println!("{}\t{}", reservation.id(), reservation.status());
        }

        print_warnings(&result.warnings, global);

        Ok(())
    }
}
