//! Configuration schema definitions.
//!
//! Every field is optional so that sources can be layered; the accessor
//! methods on [`Config`] supply the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::model::EpochMillis;

/// Hold lifetime used when no source sets `hold_minutes`.
pub const DEFAULT_HOLD_MINUTES: u32 = 15;

/// Lock wait used when no source sets `maximum_lock_wait_seconds`.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use bednight::config::Config;
///
/// let config = Config {
///     hold_minutes: Some(30),
///     ..Default::default()
/// };
/// assert_eq!(config.hold_expiry(0), 30 * 60_000);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minutes a new hold stays ACTIVE before it may be expired.
    pub hold_minutes: Option<u32>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Sweep past-due holds before placing a new one.
    pub sweep_on_hold: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective hold lifetime in minutes.
    #[must_use]
    pub fn hold_minutes(&self) -> u32 {
        self.hold_minutes.unwrap_or(DEFAULT_HOLD_MINUTES)
    }

    /// Effective lock wait in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Whether a missing database may be created on first use.
    #[must_use]
    pub fn autoinit(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// Whether to sweep before placing a hold.
    #[must_use]
    pub fn sweep_on_hold(&self) -> bool {
        self.sweep_on_hold.unwrap_or(true)
    }

    /// Computes a hold's `expires_at` from its `created_at`.
    #[must_use]
    pub fn hold_expiry(&self, created_at: EpochMillis) -> EpochMillis {
        created_at.saturating_add(i64::from(self.hold_minutes()) * 60_000)
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use bednight::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown output format '{other}' (expected table, json or csv)"
            )),
        }
    }
}
