//! Dashboard command implementation.

use crate::commands::list::write_reservations;
use crate::error::CliError;
use crate::utils::{date_or_today, load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use std::io::Write;
use tablebook::config::OutputFormat;
use tablebook::operations::Dashboard;
use tablebook::RestaurantId;

/// Show today's and tomorrow's bookings for a restaurant.
#[derive(Args)]
pub struct DashboardCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Day to treat as today (YYYY-MM-DD, default: local date)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

impl DashboardCommand {
    /// Execute the dashboard command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = output_format(self.format.as_deref(), &config)?;
        let date = date_or_today(self.date.as_deref())?;

        let db = open_database(global, &config)?;
        let dashboard = Dashboard::load(db.connection(), RestaurantId::new(self.restaurant), date)?;

        if format == OutputFormat::Json {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &dashboard)?;
            writeln!(handle)?;
            return Ok(());
        }

        // Delimited and table formats print a summary line on stderr and
        // both days' reservations as one listing
        if !global.quiet {
            eprintln!(
                "{}: {} today, {} tomorrow, occupancy {}% of {} seats",
                dashboard.date,
                dashboard.today.len(),
                dashboard.tomorrow.len(),
                dashboard.occupancy_percent,
                dashboard.capacity
            );
        }
        let mut both = dashboard.today;
        both.extend(dashboard.tomorrow);
        write_reservations(&both, format)
    }
}
