//! Pass rows: issuing, lookups and guarded status transitions.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::pass::{Holder, Pass, PassId, PassRequest, PassStatus, PassType, ValidityWindow};
use crate::slot::{Role, SlotCode};

use super::connection::Database;
use super::schema::PASS_COLUMNS;
use super::slots::timestamp_at;

const INSERT_PASS: &str = r"
    INSERT INTO passes (
        user_role, user_name, email, mobile, pass_type, slot_code,
        start_date, end_date, start_time, end_time,
        status, arrived, extension_requested, created_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'ACTIVE', 0, 0, ?)
";

const UPDATE_PASS_STATUS_IF: &str = r"
    UPDATE passes
    SET status = ?, extension_requested = ?
    WHERE id = ? AND status = ?
";

const UPDATE_PASS_SLOT: &str = "UPDATE passes SET slot_code = ? WHERE id = ?";

const UPDATE_ARRIVED: &str = "UPDATE passes SET arrived = 1 WHERE id = ?";

const SELECT_PENDING_IDS: &str =
    "SELECT id FROM passes WHERE status = 'PENDING_EXTENSION' ORDER BY id";

fn conversion_error(idx: usize, err: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

/// Deserializes a pass from a row selected with [`PASS_COLUMNS`].
fn row_to_pass(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pass> {
    let id = PassId::new(row.get(0)?).map_err(|e| conversion_error(0, e))?;
    let slot_code: String = row.get(6)?;
    let slot_code = SlotCode::new(&slot_code).map_err(|e| conversion_error(6, e))?;

    Ok(Pass {
        id,
        holder: Holder {
            role: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            mobile: row.get(4)?,
        },
        pass_type: row.get(5)?,
        slot_code,
        window: ValidityWindow {
            start_date: row.get(7)?,
            end_date: row.get(8)?,
            start_time: row.get(9)?,
            end_time: row.get(10)?,
        },
        status: row.get(11)?,
        arrived: row.get(12)?,
        extension_requested: row.get(13)?,
        created_at: timestamp_at(row, 14)?,
    })
}

/// Filters for [`Database::list_passes`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassFilter {
    /// Only passes issued to this role.
    pub role: Option<Role>,
    /// Only passes of this type.
    pub pass_type: Option<PassType>,
    /// Only passes in this status.
    pub status: Option<PassStatus>,
    /// Only passes with (or without) an outstanding extension request.
    pub extension_requested: Option<bool>,
    /// Case-insensitive substring of name, email, mobile or slot code.
    pub search: Option<String>,
}

impl PassFilter {
    /// Filter that matches every pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one role.
    #[must_use]
    pub const fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    /// Restricts to one pass type.
    #[must_use]
    pub const fn with_pass_type(mut self, pass_type: Option<PassType>) -> Self {
        self.pass_type = pass_type;
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: Option<PassStatus>) -> Self {
        self.status = status;
        self
    }

    /// Restricts on the extension flag.
    #[must_use]
    pub const fn with_extension_requested(mut self, requested: Option<bool>) -> Self {
        self.extension_requested = requested;
        self
    }

    /// Restricts to passes whose contact details or slot contain `text`.
    #[must_use]
    pub fn with_search(mut self, text: Option<String>) -> Self {
        self.search = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}

impl Database {
    /// Inserts a new ACTIVE pass and returns it.
    ///
    /// The caller is responsible for having reserved the slot in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub fn insert_pass(conn: &Connection, request: &PassRequest) -> Result<Pass> {
        let created_at = Utc::now();
        let holder = &request.holder;
        let window = &request.window;
        conn.execute(
            INSERT_PASS,
            params![
                holder.role,
                holder.name,
                holder.email,
                holder.mobile,
                request.pass_type,
                request.slot_code.as_str(),
                window.start_date,
                window.end_date,
                window.start_time,
                window.end_time,
                created_at.timestamp(),
            ],
        )?;

        let id = PassId::new(conn.last_insert_rowid())?;
        log::info!("issued pass {id} on slot {}", request.slot_code);
        Self::require_pass(conn, id)
    }

    /// Fetches a pass by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_pass(conn: &Connection, id: PassId) -> Result<Option<Pass>> {
        let sql = format!("SELECT {PASS_COLUMNS} FROM passes WHERE id = ?");
        Ok(conn.query_row(&sql, [id.get()], row_to_pass).optional()?)
    }

    /// Fetches a pass by id, failing with [`Error::NotFound`] if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a database error.
    pub fn require_pass(conn: &Connection, id: PassId) -> Result<Pass> {
        Self::get_pass(conn, id)?.ok_or_else(|| Error::not_found(format!("pass {id}")))
    }

    /// Moves a pass from `from` to `to` and sets the extension flag.
    ///
    /// The status check and the write happen in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the pass is not in `from`, or a
    /// database error.
    pub fn transition_pass_status(
        conn: &Connection,
        id: PassId,
        from: PassStatus,
        to: PassStatus,
        extension_requested: bool,
    ) -> Result<()> {
        let rows = conn.execute(
            UPDATE_PASS_STATUS_IF,
            params![to, extension_requested, id.get(), from],
        )?;
        if rows == 0 {
            return Err(Error::Conflict {
                details: format!("pass {id} is not {from}"),
            });
        }
        log::debug!("pass {id}: {from} -> {to}");
        Ok(())
    }

    /// Points a pass at a different slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the pass does not exist.
    pub fn rebind_pass_slot(conn: &Connection, id: PassId, slot: &SlotCode) -> Result<()> {
        let rows = conn.execute(UPDATE_PASS_SLOT, params![slot.as_str(), id.get()])?;
        if rows == 0 {
            return Err(Error::not_found(format!("pass {id}")));
        }
        log::debug!("pass {id} rebound to slot {slot}");
        Ok(())
    }

    /// Sets the arrived flag. Setting it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the pass does not exist.
    pub fn set_pass_arrived(conn: &Connection, id: PassId) -> Result<()> {
        let rows = conn.execute(UPDATE_ARRIVED, [id.get()])?;
        if rows == 0 {
            return Err(Error::not_found(format!("pass {id}")));
        }
        Ok(())
    }

    /// Ids of every pass awaiting an extension decision, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending_extension_ids(conn: &Connection) -> Result<Vec<PassId>> {
        let mut stmt = conn.prepare(SELECT_PENDING_IDS)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        ids.into_iter().map(PassId::new).collect()
    }

    /// Lists passes matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_passes(conn: &Connection, filter: &PassFilter) -> Result<Vec<Pass>> {
        let sql = format!(
            "SELECT {PASS_COLUMNS} FROM passes \
             WHERE (?1 IS NULL OR user_role = ?1) \
               AND (?2 IS NULL OR pass_type = ?2) \
               AND (?3 IS NULL OR status = ?3) \
               AND (?4 IS NULL OR extension_requested = ?4) \
               AND (?5 IS NULL \
                    OR instr(lower(user_name), lower(?5)) > 0 \
                    OR instr(lower(email), lower(?5)) > 0 \
                    OR instr(lower(mobile), lower(?5)) > 0 \
                    OR instr(lower(slot_code), lower(?5)) > 0) \
             ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let passes = stmt
            .query_map(
                params![
                    filter.role,
                    filter.pass_type,
                    filter.status,
                    filter.extension_requested,
                    filter.search,
                ],
                row_to_pass,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(passes)
    }
}
