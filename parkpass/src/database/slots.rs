//! Slot rows: provisioning, lookups and status writes.
//!
//! The functions taking `&Connection` never open a transaction of their own;
//! they are meant to run inside one owned by the caller (see
//! [`Database::with_transaction`]).

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::slot::{Role, Slot, SlotCode, SlotStatus, SlotType};

use super::connection::Database;
use super::schema::SLOT_COLUMNS;

const INSERT_SLOT: &str = r"
    INSERT INTO slots (code, slot_type, slot_role, slot_group, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const UPDATE_SLOT_STATUS: &str = "UPDATE slots SET status = ? WHERE code = ?";

const UPDATE_SLOT_STATUS_IF: &str = "UPDATE slots SET status = ? WHERE code = ? AND status = ?";

/// Filters for [`Database::list_slots`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFilter {
    /// Only slots of this type.
    pub slot_type: Option<SlotType>,
    /// Only slots set aside for this role.
    pub role: Option<Role>,
    /// Only slots in this group.
    pub group: Option<String>,
    /// Only slots in this status.
    pub status: Option<SlotStatus>,
}

impl SlotFilter {
    /// Filter that matches every slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one slot type.
    #[must_use]
    pub const fn with_slot_type(mut self, slot_type: Option<SlotType>) -> Self {
        self.slot_type = slot_type;
        self
    }

    /// Restricts to one role.
    #[must_use]
    pub const fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    /// Restricts to one group.
    #[must_use]
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: Option<SlotStatus>) -> Self {
        self.status = status;
        self
    }
}

/// Reads a unix-seconds column, rejecting values outside chrono's range.
pub(super) fn timestamp_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        let err = Error::validation("created_at", format!("{secs} is not a valid timestamp"));
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Integer, Box::new(err))
    })
}

/// Deserializes a slot from a row selected with [`SLOT_COLUMNS`].
pub(super) fn row_to_slot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Slot> {
    let code: String = row.get(0)?;
    let code = SlotCode::new(&code)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Slot {
        code,
        slot_type: row.get(1)?,
        role: row.get(2)?,
        group: row.get(3)?,
        status: row.get(4)?,
        created_at: timestamp_at(row, 5)?,
    })
}

impl Database {
    /// Provisions a new slot in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if a slot with the same code exists.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkpass::{Database, DatabaseConfig, Role, Slot, SlotCode, SlotType};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
    /// let slot = Slot::new(SlotCode::new("A1").unwrap(), SlotType::Car, Role::Employee, None).unwrap();
    /// db.add_slot(&slot).unwrap();
    /// ```
    pub fn add_slot(&mut self, slot: &Slot) -> Result<()> {
        self.with_transaction(|conn| Self::insert_slot(conn, slot))
    }

    /// Inserts a slot row within the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the code is taken, or a database error.
    pub fn insert_slot(conn: &Connection, slot: &Slot) -> Result<()> {
        if Self::get_slot(conn, &slot.code)?.is_some() {
            return Err(Error::Conflict {
                details: format!("slot {} already exists", slot.code),
            });
        }
        conn.execute(
            INSERT_SLOT,
            params![
                slot.code.as_str(),
                slot.slot_type,
                slot.role,
                slot.group,
                slot.status,
                slot.created_at.timestamp(),
            ],
        )?;
        log::info!("provisioned slot {} ({}/{})", slot.code, slot.slot_type, slot.role);
        Ok(())
    }

    /// Fetches a slot by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_slot(conn: &Connection, code: &SlotCode) -> Result<Option<Slot>> {
        let sql = format!("SELECT {SLOT_COLUMNS} FROM slots WHERE code = ?");
        Ok(conn
            .query_row(&sql, [code.as_str()], row_to_slot)
            .optional()?)
    }

    /// Fetches a slot by code, failing with [`Error::NotFound`] if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a database error.
    pub fn require_slot(conn: &Connection, code: &SlotCode) -> Result<Slot> {
        Self::get_slot(conn, code)?.ok_or_else(|| Error::not_found(format!("slot {code}")))
    }

    /// Returns the first AVAILABLE slot matching type and role, and the
    /// group when one is given. Ties are broken by ascending code.
    ///
    /// `exclude` skips one code, used when looking for an alternate to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn first_available_slot(
        conn: &Connection,
        slot_type: SlotType,
        role: Role,
        group: GroupMatch<'_>,
        exclude: Option<&SlotCode>,
    ) -> Result<Option<Slot>> {
        let mut sql = format!(
            "SELECT {SLOT_COLUMNS} FROM slots \
             WHERE status = 'AVAILABLE' AND slot_type = ?1 AND slot_role = ?2 AND code IS NOT ?3"
        );
        let group_value = match group {
            GroupMatch::Any => None,
            GroupMatch::Exactly(g) => {
                sql.push_str(" AND slot_group = ?4");
                Some(g)
            }
        };
        sql.push_str(" ORDER BY code LIMIT 1");

        let exclude = exclude.map(SlotCode::as_str);
        let slot = match group_value {
            None => conn
                .query_row(&sql, params![slot_type, role, exclude], row_to_slot)
                .optional()?,
            Some(g) => conn
                .query_row(&sql, params![slot_type, role, exclude, g], row_to_slot)
                .optional()?,
        };
        Ok(slot)
    }

    /// Unconditionally sets a slot's status. Returns false if no such slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_slot_status(conn: &Connection, code: &SlotCode, status: SlotStatus) -> Result<bool> {
        let rows = conn.execute(UPDATE_SLOT_STATUS, params![status, code.as_str()])?;
        Ok(rows > 0)
    }

    /// Sets a slot's status only if it currently has `expected`.
    ///
    /// Returns true if the row changed. This is the guarded transition the
    /// allocator relies on: the check and the write are one statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn transition_slot_status(
        conn: &Connection,
        code: &SlotCode,
        expected: SlotStatus,
        status: SlotStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_SLOT_STATUS_IF,
            params![status, code.as_str(), expected],
        )?;
        Ok(rows > 0)
    }

    /// Lists slots matching `filter`, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots(conn: &Connection, filter: &SlotFilter) -> Result<Vec<Slot>> {
        let sql = format!(
            "SELECT {SLOT_COLUMNS} FROM slots \
             WHERE (?1 IS NULL OR slot_type = ?1) \
               AND (?2 IS NULL OR slot_role = ?2) \
               AND (?3 IS NULL OR slot_group = ?3) \
               AND (?4 IS NULL OR status = ?4) \
             ORDER BY code"
        );
        let mut stmt = conn.prepare(&sql)?;
        let slots = stmt
            .query_map(
                params![filter.slot_type, filter.role, filter.group, filter.status],
                row_to_slot,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slots)
    }
}

/// How a slot lookup treats the group column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMatch<'a> {
    /// Ignore the group.
    Any,
    /// Only slots tagged with this group.
    Exactly(&'a str),
}
