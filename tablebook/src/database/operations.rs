//! Database CRUD operations for restaurants, tables and reservations.
//!
//! Every query is an associated function taking a `&Connection`, so the same
//! code runs on a plain connection (optimistic reads while planning) and on
//! a transaction (re-checks while committing).

use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::ids::{ReservationId, RestaurantId, TableId, UserId};
use crate::reservation::{Reservation, ReservationDraft, ReservationStatus};
use crate::restaurant::{NewRestaurant, NewTable, Restaurant, Table};
use crate::schedule::{ClockTime, OpeningHours, TimeWindow};

use super::connection::Database;
use super::schema::{
    DELETE_ASSIGNMENT, DELETE_ASSIGNMENTS_FOR_RESERVATION, INSERT_ASSIGNMENT, INSERT_RESERVATION,
};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Encodes a local wall-clock instant as seconds.
///
/// The instant is treated as if it were UTC; only ordering and differences
/// matter, so no time zone is involved.
pub(crate) fn naive_to_secs(instant: NaiveDateTime) -> i64 {
    instant.and_utc().timestamp()
}

/// Decodes seconds written by [`naive_to_secs`].
pub(crate) fn secs_to_naive(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.naive_utc())
}

fn conversion_error(column: usize, kind: Type, error: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(error))
}

fn instant_column(row: &rusqlite::Row<'_>, column: usize) -> rusqlite::Result<NaiveDateTime> {
    let secs: i64 = row.get(column)?;
    secs_to_naive(secs).ok_or_else(|| {
        conversion_error(
            column,
            Type::Integer,
            Error::DatabaseCorruption {
                details: format!("timestamp {secs} is out of range"),
            },
        )
    })
}

/// Helper function to deserialize a restaurant from a database row.
///
/// Expects row fields in this order: id, name, capacity, `opening_hours`
fn row_to_restaurant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Restaurant> {
    let hours_json: String = row.get(3)?;
    let opening_hours: OpeningHours = serde_json::from_str(&hours_json)
        .map_err(|e| conversion_error(3, Type::Text, Error::Serialization(e)))?;

    Ok(Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
        opening_hours,
    })
}

/// Helper function to deserialize a table from a database row.
///
/// Expects row fields in this order: id, `restaurant_id`, name, seats, `is_active`
fn row_to_table(row: &rusqlite::Row<'_>) -> rusqlite::Result<Table> {
    Ok(Table {
        id: row.get(0)?,
        restaurant_id: row.get(1)?,
        name: row.get(2)?,
        seats: row.get(3)?,
        is_active: row.get(4)?,
    })
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `restaurant_id`, `user_id`,
/// `start_at`, `end_at`, time, `party_size`, status, `created_at`, and a
/// comma separated list of assigned table ids (or NULL)
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: ReservationId = row.get(0)?;
    let restaurant_id: RestaurantId = row.get(1)?;
    let user_id: UserId = row.get(2)?;
    let start = instant_column(row, 3)?;
    let end = instant_column(row, 4)?;
    let time_text: String = row.get(5)?;
    let party_size: u32 = row.get(6)?;
    let status_text: String = row.get(7)?;
    let created_secs: i64 = row.get(8)?;
    let tables_text: Option<String> = row.get(9)?;

    let window = TimeWindow::new(start, end).map_err(|e| conversion_error(4, Type::Integer, e))?;
    let time = ClockTime::parse(&time_text).map_err(|e| conversion_error(5, Type::Text, e))?;
    let status = status_text
        .parse::<ReservationStatus>()
        .map_err(|e| conversion_error(7, Type::Text, e))?;

    let table_ids = tables_text
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map(TableId::new).map_err(|e| {
                conversion_error(
                    9,
                    Type::Text,
                    Error::DatabaseCorruption {
                        details: format!("bad table id '{part}': {e}"),
                    },
                )
            })
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let draft = ReservationDraft {
        restaurant_id,
        user_id,
        window,
        time,
        party_size,
    };

    Reservation::builder(id, draft)
        .status(status)
        .table_ids(table_ids)
        .created_at(unix_secs_to_systemtime(created_secs))
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

// SQL statements for CRUD operations
const INSERT_RESTAURANT: &str = r"
    INSERT INTO restaurants (name, capacity, opening_hours)
    VALUES (?, ?, ?)
";

const SELECT_RESTAURANT: &str = r"
    SELECT id, name, capacity, opening_hours
    FROM restaurants
    WHERE id = ?
";

const LIST_RESTAURANTS: &str = r"
    SELECT id, name, capacity, opening_hours
    FROM restaurants
    ORDER BY id
";

const INSERT_TABLE: &str = r"
    INSERT INTO tables (restaurant_id, name, seats, is_active)
    VALUES (?, ?, ?, ?)
";

const SELECT_TABLE: &str = r"
    SELECT id, restaurant_id, name, seats, is_active
    FROM tables
    WHERE id = ?
";

const LIST_TABLES: &str = r"
    SELECT id, restaurant_id, name, seats, is_active
    FROM tables
    WHERE restaurant_id = ?
    ORDER BY seats, id
";

const SELECT_RESERVATION_COLUMNS: &str = r"
    SELECT r.id, r.restaurant_id, r.user_id, r.start_at, r.end_at, r.time,
           r.party_size, r.status, r.created_at,
           (SELECT group_concat(rt.table_id)
              FROM reservation_tables rt
             WHERE rt.reservation_id = r.id)
    FROM reservations r
";

const SELECT_STATUS: &str = "SELECT status FROM reservations WHERE id = ?";

const UPDATE_STATUS: &str = "UPDATE reservations SET status = ? WHERE id = ?";

/// Filter for reservation listings.
///
/// All criteria are optional and combined with AND. Results are ordered by
/// start time, then id.
///
/// # Examples
///
/// ```
/// use tablebook::database::ReservationFilter;
/// use tablebook::{RestaurantId, ReservationStatus};
///
/// let filter = ReservationFilter::new()
///     .restaurant(RestaurantId::new(1))
///     .statuses(&[ReservationStatus::Pending])
///     .limit(20);
/// assert_eq!(filter.limit, Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations of this restaurant.
    pub restaurant_id: Option<RestaurantId>,
    /// Only reservations of this guest.
    pub user_id: Option<UserId>,
    /// Only reservations starting on this day.
    pub date: Option<NaiveDate>,
    /// Only reservations in one of these statuses (empty means any).
    pub statuses: Vec<ReservationStatus>,
    /// Skip cancelled reservations.
    pub exclude_cancelled: bool,
    /// Maximum number of rows.
    pub limit: Option<u32>,
    /// Rows to skip before the first returned row.
    pub offset: u32,
}

impl ReservationFilter {
    /// Creates a filter matching every reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one restaurant.
    #[must_use]
    pub const fn restaurant(mut self, id: RestaurantId) -> Self {
        self.restaurant_id = Some(id);
        self
    }

    /// Restricts to one guest.
    #[must_use]
    pub const fn user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }

    /// Restricts to reservations starting on `date`.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Restricts to the given statuses.
    #[must_use]
    pub fn statuses(mut self, statuses: &[ReservationStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    /// Skips cancelled reservations.
    #[must_use]
    pub const fn exclude_cancelled(mut self) -> Self {
        self.exclude_cancelled = true;
        self
    }

    /// Limits the number of rows.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(id) = self.restaurant_id {
            clauses.push("r.restaurant_id = ?".to_string());
            values.push(Value::Integer(id.value()));
        }
        if let Some(id) = self.user_id {
            clauses.push("r.user_id = ?".to_string());
            values.push(Value::Integer(id.value()));
        }
        if let Some(date) = self.date {
            let day_start = date.and_time(chrono::NaiveTime::MIN);
            clauses.push("r.start_at >= ? AND r.start_at < ?".to_string());
            values.push(Value::Integer(naive_to_secs(day_start)));
            values.push(Value::Integer(naive_to_secs(day_start) + 86_400));
        }
        if !self.statuses.is_empty() {
            let marks = vec!["?"; self.statuses.len()].join(", ");
            clauses.push(format!("r.status IN ({marks})"));
            values.extend(
                self.statuses
                    .iter()
                    .map(|status| Value::Text(status.as_str().to_string())),
            );
        }
        if self.exclude_cancelled {
            clauses.push("r.status <> 'CANCELLED'".to_string());
        }

        let mut sql = SELECT_RESERVATION_COLUMNS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY r.start_at, r.id");
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ? OFFSET ?");
            values.push(Value::Integer(i64::from(limit)));
            values.push(Value::Integer(i64::from(self.offset)));
        } else if self.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            values.push(Value::Integer(i64::from(self.offset)));
        }

        (sql, values)
    }
}

impl Database {
    /// Inserts a restaurant and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is invalid or the insert fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::database::Database;
    /// use tablebook::restaurant::NewRestaurant;
    /// use tablebook::{ClockTime, OpeningHours};
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// let hours = OpeningHours::every_day(
    ///     ClockTime::parse("12:00").unwrap(),
    ///     ClockTime::parse("23:00").unwrap(),
    /// );
    /// let id = Database::insert_restaurant(
    ///     db.connection(),
    ///     &NewRestaurant { name: "Trattoria".into(), capacity: None, opening_hours: hours },
    /// )
    /// .unwrap();
    ///
    /// let loaded = Database::get_restaurant(db.connection(), id).unwrap().unwrap();
    /// assert_eq!(loaded.name, "Trattoria");
    /// ```
    pub fn insert_restaurant(conn: &Connection, restaurant: &NewRestaurant) -> Result<RestaurantId> {
        restaurant.validate()?;
        let hours_json = serde_json::to_string(&restaurant.opening_hours)?;
        conn.execute(
            INSERT_RESTAURANT,
            params![restaurant.name, restaurant.capacity, hours_json],
        )?;
        Ok(RestaurantId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_restaurant(conn: &Connection, id: RestaurantId) -> Result<Option<Restaurant>> {
        Ok(conn
            .query_row(SELECT_RESTAURANT, [id], row_to_restaurant)
            .optional()?)
    }

    /// Lists all restaurants ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_restaurants(conn: &Connection) -> Result<Vec<Restaurant>> {
        let mut stmt = conn.prepare(LIST_RESTAURANTS)?;
        let restaurants = stmt
            .query_map([], row_to_restaurant)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(restaurants)
    }

    /// Inserts a table and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is invalid, the restaurant does not
    /// exist, or the insert fails.
    pub fn insert_table(conn: &Connection, table: &NewTable) -> Result<TableId> {
        table.validate()?;
        if Self::get_restaurant(conn, table.restaurant_id)?.is_none() {
            return Err(Error::RestaurantNotFound {
                id: table.restaurant_id,
            });
        }
        conn.execute(
            INSERT_TABLE,
            params![table.restaurant_id, table.name, table.seats, table.is_active],
        )?;
        Ok(TableId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_table(conn: &Connection, id: TableId) -> Result<Option<Table>> {
        Ok(conn.query_row(SELECT_TABLE, [id], row_to_table).optional()?)
    }

    /// Lists the tables of a restaurant, ordered by seats then id.
    ///
    /// Inactive tables are included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables(conn: &Connection, restaurant: RestaurantId) -> Result<Vec<Table>> {
        let mut stmt = conn.prepare(LIST_TABLES)?;
        let tables = stmt
            .query_map([restaurant], row_to_table)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(tables)
    }

    /// Inserts a reservation row without any table assignments.
    ///
    /// This method is intended for use within an existing transaction; the
    /// caller inserts the assignments and commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(
        conn: &Connection,
        draft: &ReservationDraft,
        status: ReservationStatus,
        created_at: SystemTime,
    ) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                draft.restaurant_id,
                draft.user_id,
                naive_to_secs(draft.window.start()),
                naive_to_secs(draft.window.end()),
                draft.time.to_string(),
                draft.duration_minutes(),
                draft.party_size,
                status.as_str(),
                systemtime_to_unix_secs(created_at)?,
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Assigns a table to a reservation.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a new assignment was stored
    /// - `Ok(false)` if the pair already existed
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_assignment(
        conn: &Connection,
        reservation: ReservationId,
        table: TableId,
    ) -> Result<bool> {
        let rows_affected = conn.execute(INSERT_ASSIGNMENT, params![reservation, table])?;
        Ok(rows_affected > 0)
    }

    /// Removes one table assignment.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the pair existed and was deleted
    /// - `Ok(false)` if there was no such pair
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_assignment(
        conn: &Connection,
        reservation: ReservationId,
        table: TableId,
    ) -> Result<bool> {
        let rows_affected = conn.execute(DELETE_ASSIGNMENT, params![reservation, table])?;
        Ok(rows_affected > 0)
    }

    /// Removes every table assignment of a reservation and returns how many
    /// were deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_assignments_for(conn: &Connection, reservation: ReservationId) -> Result<usize> {
        Ok(conn.execute(DELETE_ASSIGNMENTS_FOR_RESERVATION, [reservation])?)
    }

    /// Overwrites the status of a reservation.
    ///
    /// No transition rules are applied here; callers go through the status
    /// planner.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation exists and was updated
    /// - `Ok(false)` if the reservation was not found
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_status(
        conn: &Connection,
        reservation: ReservationId,
        status: ReservationStatus,
    ) -> Result<bool> {
        let rows_affected = conn.execute(UPDATE_STATUS, params![status.as_str(), reservation])?;
        Ok(rows_affected > 0)
    }

    /// Reads only the status of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored status is unknown.
    pub fn get_reservation_status(
        conn: &Connection,
        reservation: ReservationId,
    ) -> Result<Option<ReservationStatus>> {
        let text: Option<String> = conn
            .query_row(SELECT_STATUS, [reservation], |row| row.get(0))
            .optional()?;
        text.map(|text| text.parse()).transpose()
    }

    /// Retrieves a reservation with its assigned tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if the reservation doesn't exist
    pub fn get_reservation(
        conn: &Connection,
        reservation: ReservationId,
    ) -> Result<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION_COLUMNS} WHERE r.id = ?");
        Ok(conn
            .query_row(&sql, [reservation], row_to_reservation)
            .optional()?)
    }

    /// Lists reservations matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if any reservation cannot be
    /// deserialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::database::{Database, ReservationFilter};
    /// use tablebook::UserId;
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// let mine = Database::list_reservations(
    ///     db.connection(),
    ///     &ReservationFilter::new().user(UserId::new(7)).exclude_cancelled(),
    /// )
    /// .unwrap();
    /// assert!(mine.is_empty());
    /// ```
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let (sql, values) = filter.to_sql();
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params_from_iter(values), row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Verifies database integrity using `SQLite`'s built-in check.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseCorruption` if the check reports any problem, or a
    /// storage error if it cannot run.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}
