//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::{ConfigValidator, MAX_LOCK_WAIT_SECONDS};
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=MAX_LOCK_WAIT_SECONDS),
        prop::option::of(any::<bool>()),
        prop::option::of(output_format_strategy()),
        prop::option::of("[A-Z][0-9]{1,3}"),
    )
        .prop_map(|(wait, autoinit, format, group)| Config {
            maximum_lock_wait_seconds: wait,
            disable_autoinit: autoinit,
            output_format: format,
            default_slot_group: group,
        })
}

proptest! {
    #[test]
    fn merge_with_default_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn merging_twice_changes_nothing(base in config_strategy(), top in config_strategy()) {
        let mut once = base.clone();
        ConfigMerger::merge_into(&mut once, &top);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &top);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn set_fields_of_higher_source_win(base in config_strategy(), top in config_strategy()) {
        let mut merged = base.clone();
        ConfigMerger::merge_into(&mut merged, &top);
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            top.maximum_lock_wait_seconds.or(base.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, top.output_format.or(base.output_format));
        prop_assert_eq!(merged.default_slot_group, top.default_slot_group.or(base.default_slot_group));
    }

    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }
}
