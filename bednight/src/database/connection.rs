//! Database connection management.
//!
//! Opens a `SQLite` connection with WAL journaling and a busy timeout so that
//! independent processes can share one ledger file.

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Each concurrent caller should open its own `Database`; serialization
/// between them happens in `SQLite`, not in process.
///
/// # Examples
///
/// ```no_run
/// use bednight::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/bednight.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This creates the parent directory when `auto_create` is set, enables WAL
    /// mode, applies the busy timeout and initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database does not exist and `auto_create` is disabled
    /// - The database file or its parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - The stored schema version is not supported
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::NotFound {
                    resource: format!("database {}", config.path.display()),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // busy_timeout first so the WAL switch itself waits on a busy file
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode returns the new mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }

        super::migrations::check_schema_compatibility(&conn)?;
        log::debug!("opened database at {}", config.path.display());

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns how long writers wait for the lock before giving up.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.config.busy_timeout
    }
}
