//! Property-based tests for configuration merging and hold expiry.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::{ConfigValidator, MAX_HOLD_MINUTES};
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u32..=MAX_HOLD_MINUTES),
        prop::option::of(0u64..=3600),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
    )
        .prop_map(
            |(hold_minutes, lock_wait, disable_autoinit, sweep_on_hold, output_format)| Config {
                hold_minutes,
                maximum_lock_wait_seconds: lock_wait,
                disable_autoinit,
                sweep_on_hold,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Higher layer wins wherever it sets a value; lower layer survives elsewhere
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.hold_minutes, high.hold_minutes.or(low.hold_minutes));
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(result.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(result.sweep_on_hold, high.sweep_on_hold.or(low.sweep_on_hold));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
    }

    // Merging valid layers stays valid
    #[test]
    fn merged_valid_configs_validate(low in config_strategy(), high in config_strategy()) {
        let mut result = low;
        ConfigMerger::merge_into(&mut result, &high);
        prop_assert!(ConfigValidator::validate(&result).is_ok());
    }

    // Expiry is always strictly after creation for a valid hold length
    #[test]
    fn hold_expiry_is_after_creation(
        minutes in 1u32..=MAX_HOLD_MINUTES,
        created_at in 0i64..4_102_444_800_000,
    ) {
        let config = Config { hold_minutes: Some(minutes), ..Default::default() };
        let expires_at = config.hold_expiry(created_at);
        prop_assert!(expires_at > created_at);
        prop_assert_eq!(expires_at - created_at, i64::from(minutes) * 60_000);
    }

    // Serialized configs load back unchanged
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
