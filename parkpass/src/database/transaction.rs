//! Transaction helpers.
//!
//! Every mutation runs inside a `BEGIN IMMEDIATE` transaction. IMMEDIATE
//! takes the database write lock up front, so two processes racing for the
//! same slot are serialized by `SQLite` itself: the second one waits (up to
//! the busy timeout) and then sees the first one's committed state.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Begins an IMMEDIATE transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the write lock could not be taken
    /// within the busy timeout.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkpass::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// // ... work against &tx ...
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e.into(), seconds))
    }

    /// Runs `f` inside an IMMEDIATE transaction and commits if it succeeds.
    ///
    /// When `f` fails the transaction is rolled back, so a failed operation
    /// never leaves a partial write behind.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a lock/commit failure.
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let seconds = self.config.busy_timeout.as_secs();
        let tx = self.begin_transaction()?;
        let value = f(&tx).map_err(|e| lock_error(e, seconds))?;
        tx.commit().map_err(|e| lock_error(e.into(), seconds))?;
        Ok(value)
    }
}

/// Maps `SQLite` busy/locked failures onto [`Error::LockTimeout`].
fn lock_error(err: Error, seconds: u64) -> Error {
    if err.is_busy() {
        Error::LockTimeout { seconds }
    } else {
        err
    }
}
