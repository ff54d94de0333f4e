//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A loaded configuration file with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use parkpass::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/srv/parkpass")), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that exists, lowest precedence first.
    ///
    /// 1. `<data_dir>/config.yaml` (precedence 1); `data_dir` falls back to
    ///    the resolved default data directory
    /// 2. `explicit`, a file named on the command line (precedence 2); it
    ///    must exist
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or
    /// if `explicit` does not exist.
    pub fn load_all(data_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        let data_dir = crate::database::resolve_data_dir(data_dir)?;
        let user_path = data_dir.join(CONFIG_FILE_NAME);
        if user_path.exists() {
            sources.push(ConfigSource {
                config: Self::load_file(&user_path)?,
                path: user_path,
                precedence: 1,
            });
        }

        if let Some(path) = explicit {
            sources.push(ConfigSource {
                config: Self::load_file(path)?,
                path: path.to_path_buf(),
                precedence: 2,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Loads and parses one YAML file. An empty file is an empty config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read and
    /// [`Error::Validation`] if it is not a valid configuration.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        let has_content = contents
            .lines()
            .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'));
        if !has_content {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "maximum_lock_wait_seconds: [oops").unwrap();

        let result = ConfigLoader::load_file(&path);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_load_comment_only_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "# nothing here\n\n# output_format: json\n").unwrap();

        assert_eq!(ConfigLoader::load_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_all_orders_by_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "maximum_lock_wait_seconds: 3\n",
        )
        .unwrap();
        let extra = temp.path().join("extra.yaml");
        fs::write(&extra, "maximum_lock_wait_seconds: 9\n").unwrap();

        let sources = ConfigLoader::load_all(Some(temp.path()), Some(&extra)).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].config.maximum_lock_wait_seconds, Some(9));
    }

    #[test]
    fn test_load_all_without_files() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLoader::load_all(Some(temp.path()), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(ConfigLoader::load_all(Some(temp.path()), Some(&missing)).is_err());
    }
}
