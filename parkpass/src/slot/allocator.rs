//! Slot allocation: lookup, reservation, release and reallocation.
//!
//! Each operation comes in two forms. The `*_in` functions take a
//! `&Connection` and run inside a transaction owned by the caller, so a
//! pass update and its slot update can commit together. The [`Database`]
//! methods of the same name open their own IMMEDIATE transaction around
//! the `*_in` form.
//!
//! Exclusivity comes from the guarded transitions in the store: a slot
//! moves AVAILABLE -> RESERVED only through a conditional `UPDATE`, and
//! IMMEDIATE transactions serialize every writer on the database lock.

use rusqlite::Connection;

use crate::database::{Database, GroupMatch};
use crate::error::{Error, Result};

use super::{normalize_group, Role, Slot, SlotCode, SlotStatus, SlotType};

/// Finds the first AVAILABLE slot of the given type and role, and of the
/// given group when one is passed. A blank group is no filter. Slots are
/// tried in ascending code order.
///
/// Nothing is reserved; a later [`reserve_slot_in`] may still lose a race.
///
/// # Errors
///
/// Returns a validation error for a malformed group, or a database error.
pub fn get_available_slot_in(
    conn: &Connection,
    slot_type: SlotType,
    role: Role,
    group: Option<&str>,
) -> Result<Option<Slot>> {
    let group = normalize_group(group.filter(|g| !g.trim().is_empty()))?;
    let matcher = match group.as_deref() {
        Some(g) => GroupMatch::Exactly(g),
        None => GroupMatch::Any,
    };
    Database::first_available_slot(conn, slot_type, role, matcher, None)
}

/// Moves a slot from AVAILABLE to RESERVED.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no slot has `code`, and
/// [`Error::SlotUnavailable`] if it exists in any other status. The slot is
/// left untouched in both cases.
pub fn reserve_slot_in(conn: &Connection, code: &SlotCode) -> Result<Slot> {
    if Database::transition_slot_status(conn, code, SlotStatus::Available, SlotStatus::Reserved)? {
        log::debug!("slot {code}: AVAILABLE -> RESERVED");
        return Database::require_slot(conn, code);
    }

    match Database::get_slot(conn, code)? {
        None => Err(Error::not_found(format!("slot {code}"))),
        Some(slot) => Err(Error::SlotUnavailable {
            code: code.to_string(),
            status: slot.status,
        }),
    }
}

/// Sets a slot back to AVAILABLE, whatever its status.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no slot has `code`.
pub fn free_slot_in(conn: &Connection, code: &SlotCode) -> Result<Slot> {
    if !Database::set_slot_status(conn, code, SlotStatus::Available)? {
        return Err(Error::not_found(format!("slot {code}")));
    }
    log::debug!("slot {code} -> AVAILABLE");
    Database::require_slot(conn, code)
}

/// Moves a holding from `code` to another AVAILABLE slot of the same type,
/// role and group. An ungrouped slot may move into any group.
///
/// On success the current slot becomes FREED, the alternate becomes
/// RESERVED and the alternate is returned. When no alternate exists nothing
/// changes and `Ok(None)` is returned.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no slot has `code`.
pub fn reallocate_slot_in(conn: &Connection, code: &SlotCode) -> Result<Option<Slot>> {
    let current = Database::require_slot(conn, code)?;
    let group = current.group.as_deref().map_or(GroupMatch::Any, GroupMatch::Exactly);

    let Some(alternate) = Database::first_available_slot(
        conn,
        current.slot_type,
        current.role,
        group,
        Some(code),
    )?
    else {
        log::debug!("no alternate for slot {code}");
        return Ok(None);
    };

    Database::set_slot_status(conn, code, SlotStatus::Freed)?;
    let reserved = reserve_slot_in(conn, &alternate.code)?;
    log::info!("reallocated slot {code} -> {}", reserved.code);
    Ok(Some(reserved))
}

impl Database {
    /// Read-only form of [`get_available_slot_in`].
    ///
    /// # Errors
    ///
    /// See [`get_available_slot_in`].
    pub fn get_available_slot(
        &self,
        slot_type: SlotType,
        role: Role,
        group: Option<&str>,
    ) -> Result<Option<Slot>> {
        get_available_slot_in(self.connection(), slot_type, role, group)
    }

    /// Reserves a slot in its own transaction.
    ///
    /// # Errors
    ///
    /// See [`reserve_slot_in`]; also [`Error::LockTimeout`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkpass::{Database, DatabaseConfig, SlotCode};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
    /// let slot = db.reserve_slot(&SlotCode::new("A1").unwrap()).unwrap();
    /// println!("{} is now {}", slot.code, slot.status);
    /// ```
    pub fn reserve_slot(&mut self, code: &SlotCode) -> Result<Slot> {
        self.with_transaction(|conn| reserve_slot_in(conn, code))
    }

    /// Frees a slot in its own transaction.
    ///
    /// # Errors
    ///
    /// See [`free_slot_in`]; also [`Error::LockTimeout`].
    pub fn free_slot(&mut self, code: &SlotCode) -> Result<Slot> {
        self.with_transaction(|conn| free_slot_in(conn, code))
    }

    /// Reallocates a slot in its own transaction.
    ///
    /// # Errors
    ///
    /// See [`reallocate_slot_in`]; also [`Error::LockTimeout`].
    pub fn reallocate_slot(&mut self, code: &SlotCode) -> Result<Option<Slot>> {
        self.with_transaction(|conn| reallocate_slot_in(conn, code))
    }
}
