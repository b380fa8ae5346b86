//! Cancel command implementation.
//!
//! A guest cancels one of their own pending reservations before it starts.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_dry_run, GlobalOptions};
use clap::Args;
use tablebook::operations::plan_guest_cancellation;
use tablebook::{PlanExecutor, ReservationId, SystemClock, UserId};

/// Cancel one of your own pending reservations.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "RESERVATION")]
    pub reservation: i64,

    /// Guest id
    #[arg(long, value_name = "ID", env = "TABLEBOOK_USER")]
    pub user: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = plan_guest_cancellation(
            db.connection(),
            ReservationId::new(self.reservation),
            UserId::new(self.user),
            &SystemClock,
        )?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        if let Some(reservation) = result.reservation {
            println!("{}\t{}", reservation.id(), reservation.status());
        }

        Ok(())
    }
}
