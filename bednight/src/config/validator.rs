//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest hold a club may configure: one day.
pub const MAX_HOLD_MINUTES: u32 = 1440;

/// Longest lock wait accepted: one hour.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use bednight::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { hold_minutes: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(minutes) = config.hold_minutes {
            if !(1..=MAX_HOLD_MINUTES).contains(&minutes) {
                return Err(Error::Validation {
                    field: "hold_minutes".into(),
                    message: format!("must be between 1 and {MAX_HOLD_MINUTES}, got {minutes}"),
                });
            }
        }

        if let Some(seconds) = config.maximum_lock_wait_seconds {
            if seconds > MAX_LOCK_WAIT_SECONDS {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!("must not exceed {MAX_LOCK_WAIT_SECONDS}, got {seconds}"),
                });
            }
        }

        Ok(())
    }
}
