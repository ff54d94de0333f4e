//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::slot::normalize_group;

/// Longest lock wait accepted, one hour.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use parkpass::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every field that is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(seconds) = config.maximum_lock_wait_seconds {
            if seconds == 0 || seconds > MAX_LOCK_WAIT_SECONDS {
                return Err(Error::validation(
                    "maximum_lock_wait_seconds",
                    format!("Must be between 1 and {MAX_LOCK_WAIT_SECONDS}"),
                ));
            }
        }

        if let Some(group) = &config.default_slot_group {
            normalize_group(Some(group)).map_err(|e| match e {
                Error::Validation { message, .. } => {
                    Error::validation("default_slot_group", message)
                }
                other => other,
            })?;
        }

        Ok(())
    }
}
