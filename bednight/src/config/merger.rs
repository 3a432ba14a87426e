//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Merges configuration layers.
///
/// # Examples
///
/// ```
/// use bednight::config::{Config, ConfigMerger};
///
/// let low = Config { hold_minutes: Some(10), ..Default::default() };
/// let high = Config { hold_minutes: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.hold_minutes, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge source config into target. Every field that is set in `source`
    /// overwrites the target's value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.hold_minutes.is_some() {
            target.hold_minutes = source.hold_minutes;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.sweep_on_hold.is_some() {
            target.sweep_on_hold = source.sweep_on_hold;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
