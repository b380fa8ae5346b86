//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    format_timestamp, join_ids, load_configuration, open_database, output_format, parse_date,
    GlobalOptions,
};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tablebook::config::OutputFormat;
use tablebook::operations::{all_reservations, guest_reservations, restaurant_reservations};
use tablebook::{Reservation, ReservationStatus, RestaurantId, UserId};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 9] = [
    "id",
    "restaurant_id",
    "user_id",
    "start",
    "duration_minutes",
    "party_size",
    "status",
    "tables",
    "created_at",
];

/// Default page size when listing every reservation.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Reservations of this restaurant
    #[arg(long, value_name = "ID", conflicts_with = "user")]
    pub restaurant: Option<i64>,

    /// Reservations of this guest (cancelled ones are hidden)
    #[arg(long, value_name = "ID")]
    pub user: Option<i64>,

    /// Only this date, with --restaurant (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "restaurant")]
    pub date: Option<String>,

    /// Only this status, with --restaurant
    #[arg(long, value_name = "STATUS", requires = "restaurant")]
    pub status: Option<String>,

    /// Page number when listing everything, starting at 1
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub page: u32,

    /// Page size when listing everything
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Flat view of a reservation used by every output format.
#[derive(Serialize)]
pub(crate) struct ReservationRow {
    id: i64,
    restaurant_id: i64,
    user_id: i64,
    start: String,
    duration_minutes: i64,
    party_size: u32,
    status: String,
    tables: String,
    created_at: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id().value(),
            restaurant_id: r.restaurant_id().value(),
            user_id: r.user_id().value(),
            start: r.window().start().format("%Y-%m-%d %H:%M").to_string(),
            duration_minutes: r.duration_minutes(),
            party_size: r.party_size(),
            status: r.status().to_string(),
            tables: join_ids(r.table_ids()),
            created_at: format_timestamp(r.created_at()),
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;
        let format = output_format(self.format.as_deref(), &config)?;

        // 2. Parse filters before touching the store
        let date = self.date.as_deref().map(parse_date).transpose()?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ReservationStatus>)
            .transpose()?;

        // 3. Open database
        let db = open_database(global, &config)?;
        let conn = db.connection();

        // 4. Query reservations
        let reservations = match (self.restaurant, self.user) {
            (Some(restaurant), _) => {
                restaurant_reservations(conn, RestaurantId::new(restaurant), date, status)?
            }
            (None, Some(user)) => guest_reservations(conn, UserId::new(user))?,
            (None, None) => all_reservations(conn, self.page, self.page_size)?,
        };

        // 5. Format and output to stdout
        write_reservations(&reservations, format)
    }
}

/// Writes reservations to stdout in the given format.
pub(crate) fn write_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
    match format {
        OutputFormat::Table => format_as_table(&rows),
        OutputFormat::Json => format_as_json(&rows),
        OutputFormat::Csv => format_as_delimited(&rows, b','),
        OutputFormat::Tsv => format_as_delimited(&rows, b'\t'),
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(rows: &[ReservationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.restaurant_id,
            row.user_id,
            row.start,
            row.duration_minutes,
            row.party_size,
            row.status,
            if row.tables.is_empty() { "-" } else { &row.tables },
            row.created_at,
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(rows: &[ReservationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, rows)?;
    writeln!(handle)?;
    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[ReservationRow], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
