//! Book command implementation.
//!
//! This module implements the `book` command, which creates a pending
//! reservation and seats the party at one to three tables.

use crate::error::CliError;
use crate::utils::{
    join_ids, load_configuration, open_database, parse_date, print_dry_run, print_warnings,
    GlobalOptions,
};
use clap::Args;
use tablebook::operations::BookingPlan;
use tablebook::{BookingRequest, PlanExecutor, RestaurantId, TableId, UserId};

/// Book a table.
#[derive(Args)]
pub struct BookCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Guest id
    #[arg(long, value_name = "ID", env = "TABLEBOOK_USER")]
    pub user: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Start time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub time: String,

    /// Number of guests
    #[arg(long, value_name = "N")]
    pub party: u32,

    /// Booking length in minutes (default: configured booking length)
    #[arg(long, value_name = "MINUTES")]
    pub duration: Option<u32>,

    /// Book this table instead of choosing automatically
    #[arg(long, value_name = "ID")]
    pub table: Option<i64>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Build the request
        let date = parse_date(&self.date)?;
        let request = BookingRequest::new(
            RestaurantId::new(self.restaurant),
            UserId::new(self.user),
            date,
            self.time,
            self.party,
        )
        .with_duration(self.duration)
        .with_table(self.table.map(TableId::new));

        // 2. Load configuration and open database
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        // 3. Build plan
        let plan = BookingPlan::new(request, &config).build_plan(db.connection())?;

        // 4. Execute or dry-run
        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        // 5. Reservation id and its tables on stdout
        if let Some(reservation) = result.reservation {
            println!("{}\t{}", reservation.id(), join_ids(reservation.table_ids()));
        }

        print_warnings(&result.warnings, global);

        Ok(())
    }
}
