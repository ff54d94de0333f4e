//! Environment variable overrides.
//!
//! `PARKPASS_*` variables override configuration file values.

use std::env;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Overrides the lock wait.
pub const LOCK_WAIT_ENV: &str = "PARKPASS_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "PARKPASS_DISABLE_AUTOINIT";
/// Overrides the list output format.
pub const OUTPUT_FORMAT_ENV: &str = "PARKPASS_OUTPUT_FORMAT";
/// Overrides the default slot group.
pub const DEFAULT_SLOT_GROUP_ENV: &str = "PARKPASS_DEFAULT_SLOT_GROUP";

/// Applies environment variable overrides.
///
/// # Examples
///
/// ```no_run
/// use parkpass::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every `PARKPASS_*` override that is set.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| {
                    Error::validation(LOCK_WAIT_ENV, "Must be a positive integer")
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_output_format(&val)?);
        }

        if let Ok(group) = env::var(DEFAULT_SLOT_GROUP_ENV) {
            config.default_slot_group = Some(group);
        }

        Ok(())
    }

    /// Parse a boolean value from an environment variable.
    ///
    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(name: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::validation(
                name,
                format!("Invalid boolean value: {value}"),
            )),
        }
    }

    fn parse_output_format(value: &str) -> Result<OutputFormat> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "table" => Ok(OutputFormat::Table),
            _ => Err(Error::validation(
                OUTPUT_FORMAT_ENV,
                format!("Expected json, csv, tsv or table, got '{value}'"),
            )),
        }
    }
}
