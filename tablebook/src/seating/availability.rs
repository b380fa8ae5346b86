//! Free-table lookup for a restaurant and time window.

use rusqlite::{params, Connection};

use crate::database::naive_to_secs;
use crate::error::Result;
use crate::ids::{ReservationId, RestaurantId, TableId};
use crate::restaurant::FreeTable;
use crate::schedule::TimeWindow;

// A table is busy when an active reservation holding it overlaps the
// requested [start, end): existing.start < end AND start < existing.end.
const SELECT_FREE_TABLES: &str = r"
    SELECT t.id, t.seats
    FROM tables t
    WHERE t.restaurant_id = ?1
      AND t.is_active = 1
      AND (?4 IS NULL OR t.seats = ?4)
      AND NOT EXISTS (
          SELECT 1
          FROM reservation_tables rt
          JOIN reservations r ON r.id = rt.reservation_id
          WHERE rt.table_id = t.id
            AND r.status IN ('PENDING', 'CONFIRMED')
            AND r.start_at < ?3
            AND ?2 < r.end_at
            AND (?5 IS NULL OR r.id <> ?5)
      )
    ORDER BY t.seats, t.id
";

/// Query for the tables of a restaurant that are free for a window.
///
/// A table is free when it is active and no PENDING or CONFIRMED
/// reservation holding it overlaps the window. The result is computed from
/// the connection it runs on every time; run it on a transaction to get an
/// answer that holds until commit.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::database::Database;
/// use tablebook::seating::AvailabilityQuery;
/// use tablebook::{RestaurantId, TimeWindow};
///
/// let db = Database::open_in_memory().unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(19, 0, 0).unwrap();
/// let window = TimeWindow::starting_at(start, 90).unwrap();
///
/// let free = AvailabilityQuery::new(RestaurantId::new(1), window)
///     .with_exact_seats(4)
///     .run(db.connection())
///     .unwrap();
/// assert!(free.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    restaurant_id: RestaurantId,
    window: TimeWindow,
    exact_seats: Option<u32>,
    restricted_to: Option<Vec<TableId>>,
    excluding: Option<ReservationId>,
}

impl AvailabilityQuery {
    /// Creates a query over all active tables of a restaurant.
    #[must_use]
    pub const fn new(restaurant_id: RestaurantId, window: TimeWindow) -> Self {
        Self {
            restaurant_id,
            window,
            exact_seats: None,
            restricted_to: None,
            excluding: None,
        }
    }

    /// Only tables with exactly this many seats.
    #[must_use]
    pub const fn with_exact_seats(mut self, seats: u32) -> Self {
        self.exact_seats = Some(seats);
        self
    }

    /// Sets or clears the exact seat filter.
    #[must_use]
    pub const fn exact_seats(mut self, seats: Option<u32>) -> Self {
        self.exact_seats = seats;
        self
    }

    /// Only the listed tables.
    #[must_use]
    pub fn restricted_to(mut self, table_ids: &[TableId]) -> Self {
        self.restricted_to = Some(table_ids.to_vec());
        self
    }

    /// Ignores the assignments of this reservation, so a reservation does
    /// not block itself.
    #[must_use]
    pub const fn excluding_reservation(mut self, reservation: ReservationId) -> Self {
        self.excluding = Some(reservation);
        self
    }

    /// Runs the query, returning free tables ordered by seats then id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn run(&self, conn: &Connection) -> Result<Vec<FreeTable>> {
        let mut stmt = conn.prepare_cached(SELECT_FREE_TABLES)?;
        let mut free = stmt
            .query_map(
                params![
                    self.restaurant_id,
                    naive_to_secs(self.window.start()),
                    naive_to_secs(self.window.end()),
                    self.exact_seats,
                    self.excluding,
                ],
                |row| {
                    Ok(FreeTable {
                        table_id: row.get(0)?,
                        seats: row.get(1)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        if let Some(allowed) = &self.restricted_to {
            free.retain(|table| allowed.contains(&table.table_id));
        }

        Ok(free)
    }

    /// Returns the tables of `wanted` that are not free for the window.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn missing_from(&self, conn: &Connection, wanted: &[TableId]) -> Result<Vec<TableId>> {
        let free = self.clone().restricted_to(wanted).run(conn)?;
        Ok(wanted
            .iter()
            .copied()
            .filter(|id| !free.iter().any(|table| table.table_id == *id))
            .collect())
    }
}

/// Lists the free tables of a restaurant for a window.
///
/// # Errors
///
/// Returns a storage error if the query fails.
pub fn list_free_tables(
    conn: &Connection,
    restaurant_id: RestaurantId,
    window: TimeWindow,
    exact_seats: Option<u32>,
) -> Result<Vec<FreeTable>> {
    AvailabilityQuery::new(restaurant_id, window)
        .exact_seats(exact_seats)
        .run(conn)
}
