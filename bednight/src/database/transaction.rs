//! Transaction management utilities.
//!
//! Every lifecycle operation runs inside one `BEGIN IMMEDIATE` transaction so
//! the write lock is taken up front and two writers never interleave their
//! reads and conditional updates.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Begins an IMMEDIATE transaction.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another connection holds the write
    /// lock for longer than the configured busy timeout, or a database error
    /// for any other failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bednight::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.busy_timeout().as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_timeout_or(e, seconds))
    }
}

/// Maps `SQLITE_BUSY`/`SQLITE_LOCKED` to [`Error::LockTimeout`].
pub(crate) fn lock_timeout_or(err: rusqlite::Error, seconds: u64) -> Error {
    let busy = matches!(
        &err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked
    );
    if busy {
        Error::LockTimeout { seconds }
    } else {
        err.into()
    }
}
