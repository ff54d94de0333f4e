//! The [`Database`] handle.
//!
//! Several CLI processes may share one database file, so every read-write
//! handle runs in WAL mode with a busy timeout: readers never block the
//! writer, and writers queue on the lock instead of failing at once.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::migrations;

/// An open slot and pass store.
///
/// # Examples
///
/// ```no_run
/// use parkpass::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
/// let slots = Database::list_slots(db.connection(), &Default::default()).unwrap();
/// println!("{} slots provisioned", slots.len());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    pub(super) config: DatabaseConfig,
}

impl Database {
    /// Opens (and on first use creates) the store described by `config`.
    ///
    /// A fresh file gets the current schema; an existing one must already
    /// be at the current schema version.
    ///
    /// # Errors
    ///
    /// - [`Error::DataDirectoryNotFound`] if the file is missing and
    ///   `auto_create` is off
    /// - [`Error::UnsupportedSchemaVersion`] for a file written by a
    ///   different schema version
    /// - I/O or database errors while creating, opening or configuring it
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: containing_dir(&config.path),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(&config.path, open_flags(&config))?;
        apply_pragmas(&conn, &config)?;
        migrations::check_schema_compatibility(&conn)?;

        log::debug!(
            "opened {} (busy timeout {}ms)",
            config.path.display(),
            config.busy_timeout.as_millis()
        );
        Ok(Self { conn, config })
    }

    /// The underlying `SQLite` connection, for the store's read queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn containing_dir(path: &Path) -> PathBuf {
    path.parent()
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}

fn open_flags(config: &DatabaseConfig) -> OpenFlags {
    let access = if config.read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    } else if config.auto_create {
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE
    };
    access | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

/// The busy timeout goes first: switching to WAL can itself need the lock.
fn apply_pragmas(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    conn.busy_timeout(config.busy_timeout)?;
    if config.read_only {
        return Ok(());
    }
    // journal_mode answers with a row
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    log::trace!("journal mode {mode}");
    conn.execute_batch("PRAGMA synchronous = NORMAL")?;
    Ok(())
}
