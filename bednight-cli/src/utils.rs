//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, the wall clock and
//! output formatting.

use std::path::PathBuf;
use std::time::Duration;

use bednight::config::OutputFormat;
use bednight::database::{default_data_dir, DATABASE_FILE_NAME};
use bednight::{Config, ConfigBuilder, Database, DatabaseConfig, EpochMillis};
use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Output format flag shared by commands that print records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Picks the flag's format, then the configured one, then table.
pub fn resolve_format(flag: Option<FormatArg>, config: &Config) -> OutputFormat {
    flag.map(OutputFormat::from)
        .or(config.output_format)
        .unwrap_or_default()
}

/// Resolve the data directory: `--data-dir` (or `BEDNIGHT_DATA_DIR`), else
/// `~/.bednight`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `{data_dir}/config.yaml`
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && (global.disable_autoinit || !config.autoinit()) {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> EpochMillis {
    Utc::now().timestamp_millis()
}

/// Uses the caller's `--now` when given, else the wall clock.
pub fn resolve_now(now: Option<EpochMillis>) -> EpochMillis {
    now.unwrap_or_else(now_millis)
}

/// Format an epoch-millisecond timestamp for display.
pub fn format_timestamp(ts: EpochMillis) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map_or_else(|| ts.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Wrap a serializer failure as an I/O error.
pub fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Wrap a CSV writer failure as an I/O error.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
