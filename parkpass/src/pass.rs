//! Parking pass types.
//!
//! A pass grants one holder the use of one slot over a validity window. Its
//! lifecycle is driven by the plans in [`crate::operations`]; passes are never
//! deleted, they move to a terminal status instead.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::label::labelled_enum;
use crate::slot::{Role, SlotCode};

/// Date format accepted for validity windows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a holder name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a mobile number, including a leading `+`.
pub const MAX_MOBILE_LEN: usize = 15;

labelled_enum! {
    /// Pass duration class.
    pub enum PassType as "pass_type" {
        /// One day.
        Daily => "DAILY",
        /// One month.
        Monthly => "MONTHLY",
        /// One year.
        Yearly => "YEARLY",
    }
}

labelled_enum! {
    /// Lifecycle status of a pass.
    pub enum PassStatus as "pass_status" {
        /// Issued and holding its slot.
        Active => "ACTIVE",
        /// The holder asked for an extension; awaiting an administrator.
        PendingExtension => "PENDING_EXTENSION",
        /// Extension approved.
        Extended => "EXTENDED",
        /// Cancelled by the holder; the slot was released.
        Cancelled => "CANCELLED",
        /// The window began without an arrival.
        NoShow => "NO_SHOW",
        /// The window has ended.
        Expired => "EXPIRED",
    }
}

impl PassStatus {
    /// Returns true for the statuses in which the pass holds its slot.
    #[must_use]
    pub const fn holds_slot(self) -> bool {
        matches!(self, Self::Active | Self::PendingExtension | Self::Extended)
    }
}

/// Surrogate pass identifier. Always positive.
///
/// # Examples
///
/// ```
/// use parkpass::PassId;
///
/// let id: PassId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!(PassId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PassId(i64);

impl PassId {
    /// Creates a pass id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `id` is not positive.
    pub fn new(id: i64) -> Result<Self> {
        if id <= 0 {
            return Err(Error::validation("pass_id", "must be a positive integer"));
        }
        Ok(Self(id))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PassId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::validation("pass_id", format!("'{s}' is not an integer")))?;
        Self::new(id)
    }
}

impl TryFrom<i64> for PassId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PassId> for i64 {
    fn from(id: PassId) -> Self {
        id.0
    }
}

/// Who a pass is issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    /// Holder category.
    #[serde(rename = "user_role")]
    pub role: Role,
    /// Display name.
    #[serde(rename = "user_name")]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact mobile number.
    pub mobile: String,
}

impl Holder {
    /// Creates a validated holder. Name, email and mobile are trimmed.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad field.
    pub fn new(
        role: Role,
        name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Result<Self> {
        let holder = Self {
            role,
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            mobile: mobile.into().trim().to_string(),
        };
        holder.validate()?;
        Ok(holder)
    }

    /// Checks the contact fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_mobile(&self.mobile)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "must be non-empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::validation(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::validation("email", "must contain exactly one '@'"));
    };
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(Error::validation(
            "email",
            format!("'{email}' is not a valid address"),
        ));
    }
    Ok(())
}

fn validate_mobile(mobile: &str) -> Result<()> {
    let digits = mobile.strip_prefix('+').unwrap_or(mobile);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(
            "mobile",
            "must be digits with an optional leading '+'",
        ));
    }
    if mobile.len() > MAX_MOBILE_LEN {
        return Err(Error::validation(
            "mobile",
            format!("must be at most {MAX_MOBILE_LEN} characters"),
        ));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a validation error attributed to `field`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| Error::validation(field, format!("'{value}' is not a YYYY-MM-DD date: {e}")))
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns a validation error attributed to `field`.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| Error::validation(field, format!("'{value}' is not an HH:MM time")))
}

/// When a pass is valid.
///
/// # Examples
///
/// ```
/// use parkpass::ValidityWindow;
///
/// let window = ValidityWindow::parse("2024-03-01", "2024-03-01", "09:00", "18:00").unwrap();
/// assert_eq!(window.start_date.to_string(), "2024-03-01");
///
/// assert!(ValidityWindow::parse("2024-03-02", "2024-03-01", "09:00", "18:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// First valid day.
    pub start_date: NaiveDate,
    /// Last valid day.
    pub end_date: NaiveDate,
    /// Start time on the first day.
    pub start_time: NaiveTime,
    /// End time on the last day.
    pub end_time: NaiveTime,
}

impl ValidityWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the window ends before it starts.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self> {
        let window = Self {
            start_date,
            end_date,
            start_time,
            end_time,
        };
        window.validate()?;
        Ok(window)
    }

    /// Parses and validates a window from its four textual parts.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unparseable part or an inverted window.
    pub fn parse(start_date: &str, end_date: &str, start_time: &str, end_time: &str) -> Result<Self> {
        Self::new(
            parse_date("start_date", start_date)?,
            parse_date("end_date", end_date)?,
            parse_time("start_time", start_time)?,
            parse_time("end_time", end_time)?,
        )
    }

    /// The first valid instant.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    /// The last valid instant.
    #[must_use]
    pub fn ends_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Checks that the window does not end before it starts.
    ///
    /// # Errors
    ///
    /// Returns a validation error on an inverted window.
    pub fn validate(&self) -> Result<()> {
        if self.ends_at() < self.starts_at() {
            return Err(Error::validation(
                "end_date",
                format!(
                    "window ends ({}) before it starts ({})",
                    self.ends_at(),
                    self.starts_at()
                ),
            ));
        }
        Ok(())
    }
}

/// Everything needed to issue a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRequest {
    /// Who the pass is for.
    #[serde(flatten)]
    pub holder: Holder,
    /// Duration class.
    pub pass_type: PassType,
    /// The slot to reserve.
    pub slot_code: SlotCode,
    /// When the pass is valid.
    #[serde(flatten)]
    pub window: ValidityWindow,
}

impl PassRequest {
    /// Assembles a request. Call [`PassRequest::validate`] before handing
    /// a request built from untrusted parts to the store.
    #[must_use]
    pub const fn new(
        holder: Holder,
        pass_type: PassType,
        slot_code: SlotCode,
        window: ValidityWindow,
    ) -> Self {
        Self {
            holder,
            pass_type,
            slot_code,
            window,
        }
    }

    /// Re-checks every field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.holder.validate()?;
        self.window.validate()
    }
}

/// A pass as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    /// Surrogate id.
    #[serde(rename = "pass_id")]
    pub id: PassId,
    /// Who holds it.
    #[serde(flatten)]
    pub holder: Holder,
    /// Duration class.
    pub pass_type: PassType,
    /// Code of the bound slot.
    pub slot_code: SlotCode,
    /// When it is valid.
    #[serde(flatten)]
    pub window: ValidityWindow,
    /// Lifecycle status.
    pub status: PassStatus,
    /// Whether the holder has arrived.
    pub arrived: bool,
    /// Whether an extension is awaiting review.
    pub extension_requested: bool,
    /// When the pass was issued.
    pub created_at: DateTime<Utc>,
}
