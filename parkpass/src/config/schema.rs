//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lock wait used when nothing configures one.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; the accessor
/// methods apply the built-in defaults.
///
/// # Examples
///
/// ```
/// use parkpass::config::{Config, OutputFormat};
///
/// let config = Config {
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.output_format(), OutputFormat::Json);
/// assert_eq!(config.lock_wait().as_secs(), 5);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for the database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create the database on first use.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Group used by slot lookups that do not name one.
    pub default_slot_group: Option<String>,
}

impl Config {
    /// The configured lock wait, or the default.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether a missing database may be created.
    #[must_use]
    pub fn autoinit_enabled(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// The configured list format, or [`OutputFormat::Table`].
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use parkpass::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
maximum_lock_wait_seconds: 12
disable_autoinit: true
output_format: csv
default_slot_group: L2
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.lock_wait(), Duration::from_secs(12));
        assert!(!config.autoinit_enabled());
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.default_slot_group.as_deref(), Some("L2"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lock_wait(), Duration::from_secs(DEFAULT_LOCK_WAIT_SECONDS));
        assert!(config.autoinit_enabled());
        assert_eq!(config.output_format(), OutputFormat::Table);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("port_range: 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Tsv.to_string(), "tsv");
        let parsed: OutputFormat = serde_yaml::from_str("json").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }
}
