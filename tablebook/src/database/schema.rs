//! Database schema definitions and SQL constants.
//!
//! Reservation windows are stored as integer seconds of restaurant-local
//! wall-clock time so that overlap checks run entirely in SQL.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the restaurants table.
///
/// Opening hours are a JSON object keyed by lowercase weekday.
pub const CREATE_RESTAURANTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        capacity INTEGER CHECK (capacity IS NULL OR capacity >= 0),
        opening_hours TEXT NOT NULL DEFAULT '{}'
    )";

/// SQL statement to create the physical tables table.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS tables (
        id INTEGER PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
        name TEXT,
        seats INTEGER NOT NULL CHECK (seats > 0),
        is_active INTEGER NOT NULL DEFAULT 1
    )";

/// SQL statement to create the reservations table.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
        user_id INTEGER NOT NULL,
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        time TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
        party_size INTEGER NOT NULL CHECK (party_size > 0),
        status TEXT NOT NULL
            CHECK (status IN ('PENDING', 'CONFIRMED', 'REJECTED', 'CANCELLED')),
        created_at INTEGER NOT NULL,
        CHECK (end_at > start_at)
    )";

/// SQL statement to create the table assignment join table.
///
/// The primary key makes each (reservation, table) pair unique.
pub const CREATE_RESERVATION_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservation_tables (
        reservation_id INTEGER NOT NULL REFERENCES reservations(id),
        table_id INTEGER NOT NULL REFERENCES tables(id),
        PRIMARY KEY (reservation_id, table_id)
    )";

/// Index for listing a restaurant's tables.
pub const CREATE_TABLES_RESTAURANT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tables_restaurant ON tables(restaurant_id)";

/// Index for per-restaurant reservation listings by time.
pub const CREATE_RESERVATIONS_RESTAURANT_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_restaurant_start ON reservations(restaurant_id, start_at)";

/// Index for a guest's own reservations.
pub const CREATE_RESERVATIONS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// Index for finding which reservations hold a table.
pub const CREATE_RESERVATION_TABLES_TABLE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservation_tables_table ON reservation_tables(table_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (restaurant_id, user_id, start_at, end_at, time, duration_minutes, party_size, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to assign a table to a reservation.
///
/// An existing pair is left untouched.
pub const INSERT_ASSIGNMENT: &str = r"
    INSERT OR IGNORE INTO reservation_tables (reservation_id, table_id)
    VALUES (?, ?)
";

/// SQL statement to remove one table assignment.
pub const DELETE_ASSIGNMENT: &str = r"
    DELETE FROM reservation_tables
    WHERE reservation_id = ? AND table_id = ?
";

/// SQL statement to remove every table assignment of a reservation.
pub const DELETE_ASSIGNMENTS_FOR_RESERVATION: &str = r"
    DELETE FROM reservation_tables
    WHERE reservation_id = ?
";
