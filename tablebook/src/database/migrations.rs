//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_RESERVATIONS_RESTAURANT_INDEX, CREATE_RESERVATIONS_TABLE,
    CREATE_RESERVATIONS_USER_INDEX, CREATE_RESERVATION_TABLES_TABLE,
    CREATE_RESERVATION_TABLES_TABLE_INDEX, CREATE_RESTAURANTS_TABLE, CREATE_TABLES_RESTAURANT_INDEX,
    CREATE_TABLES_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and the schema version entry for a fresh
/// database. The statements run in one batch inside a transaction so a
/// half-initialized file is never left behind.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use tablebook::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    for statement in [
        CREATE_METADATA_TABLE,
        CREATE_RESTAURANTS_TABLE,
        CREATE_TABLES_TABLE,
        CREATE_RESERVATIONS_TABLE,
        CREATE_RESERVATION_TABLES_TABLE,
        CREATE_TABLES_RESTAURANT_INDEX,
        CREATE_RESERVATIONS_RESTAURANT_INDEX,
        CREATE_RESERVATIONS_USER_INDEX,
        CREATE_RESERVATION_TABLES_TABLE_INDEX,
    ] {
        tx.execute(statement, [])?;
    }

    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    tx.commit()?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let metadata_exists: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !metadata_exists {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// 1. A version of 0 means a fresh database, which gets initialized
/// 2. Any other version must match [`CURRENT_SCHEMA_VERSION`] exactly
///
/// # Errors
///
/// Returns `UnsupportedSchemaVersion` for a database written by an older or
/// newer release, or a storage error if the queries fail.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
