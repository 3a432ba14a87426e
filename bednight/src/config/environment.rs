//! Environment variable handling for configuration overrides.
//!
//! `BEDNIGHT_*` variables override values from the configuration file.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Hold lifetime override.
pub const ENV_HOLD_MINUTES: &str = "BEDNIGHT_HOLD_MINUTES";
/// Lock wait override.
pub const ENV_LOCK_WAIT: &str = "BEDNIGHT_MAXIMUM_LOCK_WAIT_SECONDS";
/// Auto-initialization switch.
pub const ENV_DISABLE_AUTOINIT: &str = "BEDNIGHT_DISABLE_AUTOINIT";
/// Pre-hold sweep switch.
pub const ENV_SWEEP_ON_HOLD: &str = "BEDNIGHT_SWEEP_ON_HOLD";
/// Output format override.
pub const ENV_OUTPUT_FORMAT: &str = "BEDNIGHT_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use bednight::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong shape.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(minutes) = env::var(ENV_HOLD_MINUTES) {
            config.hold_minutes = Some(minutes.trim().parse().map_err(|_| Error::Validation {
                field: ENV_HOLD_MINUTES.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Ok(seconds) = env::var(ENV_LOCK_WAIT) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: ENV_LOCK_WAIT.into(),
                    message: "Must be a non-negative integer".into(),
                })?);
        }

        if let Ok(val) = env::var(ENV_DISABLE_AUTOINIT) {
            config.disable_autoinit = Some(Self::parse_bool(ENV_DISABLE_AUTOINIT, &val)?);
        }

        if let Ok(val) = env::var(ENV_SWEEP_ON_HOLD) {
            config.sweep_on_hold = Some(Self::parse_bool(ENV_SWEEP_ON_HOLD, &val)?);
        }

        if let Ok(format) = env::var(ENV_OUTPUT_FORMAT) {
            config.output_format =
                Some(format.trim().parse().map_err(|message| Error::Validation {
                    field: ENV_OUTPUT_FORMAT.into(),
                    message,
                })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
