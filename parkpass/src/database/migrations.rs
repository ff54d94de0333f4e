//! Schema creation and version checks.
//!
//! There is a single schema version so far; a database stamped with any
//! other version is refused rather than guessed at.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_PASSES_TABLE, CREATE_PASS_SLOT_INDEX, CREATE_PASS_STATUS_INDEX,
    CREATE_SLOTS_TABLE, CREATE_SLOT_LOOKUP_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Statements that build the current schema, in order.
const SCHEMA_STATEMENTS: [&str; 6] = [
    CREATE_METADATA_TABLE,
    CREATE_SLOTS_TABLE,
    CREATE_PASSES_TABLE,
    CREATE_SLOT_LOOKUP_INDEX,
    CREATE_PASS_STATUS_INDEX,
    CREATE_PASS_SLOT_INDEX,
];

/// Creates every table and index and stamps the schema version.
///
/// Safe to run against an initialized database.
///
/// # Errors
///
/// Returns the first failing statement's error.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use parkpass::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// The stored schema version, or 0 for a database never initialized.
///
/// # Errors
///
/// Returns a database error, or a validation error if the stored version
/// is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    let stored: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;
    stored.map_or(Ok(0), |value| {
        value
            .parse()
            .map_err(|_| Error::validation("schema_version", format!("'{value}' is not a number")))
    })
}

/// Initializes a fresh database, or verifies an existing one is current.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for any other stored
/// version, or an error raised while initializing.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => {
            log::debug!("creating schema version {CURRENT_SCHEMA_VERSION}");
            initialize_schema(conn)
        }
        CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: found.unsigned_abs(),
        }),
    }
}
