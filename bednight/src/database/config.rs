//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "bednight.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BEDNIGHT_DATA_DIR";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use bednight::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/bednight.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a writer waits for the lock held by another connection.
    pub busy_timeout: Duration,
    /// Whether to create the database (and its parent directory) if missing.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Defaults: 5000ms busy timeout, auto-create on, read-write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether a missing database may be created.
    #[must_use]
    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use bednight::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/bednight.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.bednight`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".bednight"))
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$BEDNIGHT_DATA_DIR/bednight.db` if `BEDNIGHT_DATA_DIR` is set
/// 2. `~/.bednight/bednight.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `BEDNIGHT_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(data_dir) if !data_dir.is_empty() => {
            Ok(PathBuf::from(data_dir).join(DATABASE_FILE_NAME))
        }
        _ => Ok(default_data_dir()?.join(DATABASE_FILE_NAME)),
    }
}
