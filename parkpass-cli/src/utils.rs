//! Utility functions for CLI operations.
//!
//! Configuration loading, database opening and the small formatting
//! helpers shared by several commands.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parkpass::config::OutputFormat;
use parkpass::database::{resolve_data_dir, DATABASE_FILE_NAME};
use parkpass::{Config, ConfigBuilder, Database, DatabaseConfig};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // `verbose` is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Extra configuration file, above `<data_dir>/config.yaml`.
    pub config: Option<PathBuf>,

    /// Override the lock wait (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

impl GlobalOptions {
    /// The data directory these options select.
    pub fn data_dir(&self) -> Result<PathBuf, CliError> {
        resolve_data_dir(self.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Prints a warning to stderr unless `--quiet` was given.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("Warning: {message}");
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = global.data_dir()?;
    let mut builder = ConfigBuilder::new().with_data_dir(&data_dir);
    if let Some(path) = &global.config {
        builder = builder.with_config_file(path);
    }

    let overrides = Config {
        maximum_lock_wait_seconds: global.busy_timeout,
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    builder
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    Ok(global.data_dir()?.join(DATABASE_FILE_NAME))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global)?;

    if !db_path.exists() && !config.autoinit_enabled() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.lock_wait());
    Database::open(db_config).map_err(CliError::from)
}

/// The list format: the command's `--format`, else the configured one.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_resolve_format_prefers_flag() {
        let config = Config {
            output_format: Some(OutputFormat::Csv),
            ..Config::default()
        };
        assert_eq!(resolve_format(Some(OutputFormat::Json), &config), OutputFormat::Json);
        assert_eq!(resolve_format(None, &config), OutputFormat::Csv);
        assert_eq!(resolve_format(None, &Config::default()), OutputFormat::Table);
    }
}
