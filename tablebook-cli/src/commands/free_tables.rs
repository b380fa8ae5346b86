//! Free-tables command implementation.
//!
//! Lists the active tables of a restaurant that no pending or confirmed
//! booking holds during a window.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, output_format, parse_date, GlobalOptions};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tablebook::config::OutputFormat;
use tablebook::{list_free_tables, ClockTime, FreeTable, RestaurantId, TimeWindow};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 2] = ["table_id", "seats"];

/// List free tables for a time window.
#[derive(Args)]
pub struct FreeTablesCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Start time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub time: String,

    /// Window length in minutes (default: configured booking length)
    #[arg(long, value_name = "MINUTES")]
    pub duration: Option<u32>,

    /// Only tables with exactly this many seats
    #[arg(long, value_name = "SEATS")]
    pub seats: Option<u32>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

#[derive(Serialize)]
struct FreeTableRow {
    table_id: i64,
    seats: u32,
}

impl From<&FreeTable> for FreeTableRow {
    fn from(table: &FreeTable) -> Self {
        Self {
            table_id: table.table_id.value(),
            seats: table.seats,
        }
    }
}

impl FreeTablesCommand {
    /// Execute the free-tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = output_format(self.format.as_deref(), &config)?;

        let date = parse_date(&self.date)?;
        let time = ClockTime::parse(&self.time)?;
        let naive = time.to_naive_time().ok_or_else(|| {
            CliError::InvalidArguments(format!("invalid start time '{}'", self.time))
        })?;
        let duration = self.duration.unwrap_or_else(|| config.duration_minutes());
        let window = TimeWindow::starting_at(date.and_time(naive), duration)?;

        let db = open_database(global, &config)?;
        let tables = list_free_tables(
            db.connection(),
            RestaurantId::new(self.restaurant),
            window,
            self.seats,
        )?;

        let rows: Vec<FreeTableRow> = tables.iter().map(FreeTableRow::from).collect();
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match format {
            OutputFormat::Table => {
                writeln!(handle, "TABLE_ID\tSEATS")?;
                for row in &rows {
                    writeln!(handle, "{}\t{}", row.table_id, row.seats)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &rows)?;
                writeln!(handle)?;
            }
            OutputFormat::Csv | OutputFormat::Tsv => {
                let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(delimiter)
                    .has_headers(false)
                    .from_writer(handle);
                writer.write_record(COLUMN_HEADERS)?;
                for row in &rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            }
        }

        Ok(())
    }
}
