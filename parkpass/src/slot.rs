//! Parking slot types.
//!
//! A slot is a single physical parking space identified by a short unique
//! code. Its type and the holder role it is set aside for never change; its
//! status is driven by the [`allocator`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::label::labelled_enum;

pub mod allocator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

labelled_enum! {
    /// Kind of vehicle a slot accommodates.
    pub enum SlotType as "slot_type" {
        /// A car space.
        Car => "CAR",
        /// A bike space.
        Bike => "BIKE",
    }
}

labelled_enum! {
    /// Holder category. Slots are set aside per role and passes are issued per role.
    pub enum Role as "role" {
        /// Staff member.
        Employee => "EMPLOYEE",
        /// Visitor.
        Visitor => "VISITOR",
        /// Guest.
        Guest => "GUEST",
    }
}

labelled_enum! {
    /// Lifecycle status of a slot.
    pub enum SlotStatus as "slot_status" {
        /// Free to be reserved.
        Available => "AVAILABLE",
        /// Held by a pass.
        Reserved => "RESERVED",
        /// A vehicle is parked in it.
        Occupied => "OCCUPIED",
        /// Released by a reallocation.
        Freed => "FREED",
        /// Moved elsewhere.
        Reallocated => "REALLOCATED",
    }
}

impl SlotStatus {
    /// Returns true for the statuses in which a pass holds the slot.
    #[must_use]
    pub const fn is_held(self) -> bool {
        matches!(self, Self::Reserved | Self::Occupied)
    }
}

/// Unique slot identifier, e.g. `A1`.
///
/// Codes are trimmed, non-empty and at most [`SlotCode::MAX_LEN`] characters.
///
/// # Examples
///
/// ```
/// use parkpass::SlotCode;
///
/// let code = SlotCode::new(" A1 ").unwrap();
/// assert_eq!(code.as_str(), "A1");
///
/// assert!(SlotCode::new("").is_err());
/// assert!(SlotCode::new("ABCDEFGHIJK").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotCode(String);

impl SlotCode {
    /// Maximum length of a slot code, in characters.
    pub const MAX_LEN: usize = 10;

    /// Creates a validated slot code.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the code is empty after trimming or too long.
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::validation("slot_code", "must be non-empty"));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(Error::validation(
                "slot_code",
                format!("must be at most {} characters", Self::MAX_LEN),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SlotCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for SlotCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SlotCode> for String {
    fn from(code: SlotCode) -> Self {
        code.0
    }
}

/// Validates an optional slot group tag.
///
/// Groups follow the same rules as codes: trimmed, non-empty, at most
/// [`SlotCode::MAX_LEN`] characters.
///
/// # Errors
///
/// Returns a validation error if a group is given but is blank or too long.
pub fn normalize_group(group: Option<&str>) -> Result<Option<String>> {
    let Some(group) = group else {
        return Ok(None);
    };
    let trimmed = group.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("slot_group", "must be non-empty when given"));
    }
    if trimmed.chars().count() > SlotCode::MAX_LEN {
        return Err(Error::validation(
            "slot_group",
            format!("must be at most {} characters", SlotCode::MAX_LEN),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// A parking slot as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique code.
    pub code: SlotCode,
    /// Vehicle kind.
    pub slot_type: SlotType,
    /// Holder role the slot is set aside for.
    pub role: Role,
    /// Optional grouping tag (zone, floor, ...).
    pub group: Option<String>,
    /// Current status.
    pub status: SlotStatus,
    /// When the slot was provisioned.
    pub created_at: DateTime<Utc>,
}

impl Slot {
    /// Creates a new AVAILABLE slot for provisioning.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the group is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkpass::{Role, Slot, SlotCode, SlotStatus, SlotType};
    ///
    /// let slot = Slot::new(SlotCode::new("A1").unwrap(), SlotType::Car, Role::Employee, Some("L1")).unwrap();
    /// assert_eq!(slot.status, SlotStatus::Available);
    /// assert_eq!(slot.group.as_deref(), Some("L1"));
    /// ```
    pub fn new(code: SlotCode, slot_type: SlotType, role: Role, group: Option<&str>) -> Result<Self> {
        Ok(Self {
            code,
            slot_type,
            role,
            group: normalize_group(group)?,
            status: SlotStatus::Available,
            created_at: Utc::now(),
        })
    }
}
