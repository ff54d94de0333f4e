//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence.
///
/// # Examples
///
/// ```
/// use parkpass::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(2), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            log::debug!("merging configuration from {}", source.path.display());
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` into `target`. Every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
        if source.default_slot_group.is_some() {
            target.default_slot_group.clone_from(&source.default_slot_group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/cfg/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_later_sources_win_field_by_field() {
        let user = Config {
            maximum_lock_wait_seconds: Some(3),
            output_format: Some(OutputFormat::Csv),
            ..Default::default()
        };
        let explicit = Config {
            output_format: Some(OutputFormat::Json),
            default_slot_group: Some("L1".into()),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, user), source(2, explicit)]);
        assert_eq!(merged.maximum_lock_wait_seconds, Some(3));
        assert_eq!(merged.output_format, Some(OutputFormat::Json));
        assert_eq!(merged.default_slot_group.as_deref(), Some("L1"));
        assert_eq!(merged.disable_autoinit, None);
    }

    #[test]
    fn test_none_does_not_clear() {
        let mut target = Config {
            disable_autoinit: Some(true),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.disable_autoinit, Some(true));
    }
}
