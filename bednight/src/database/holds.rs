//! Hold row access.
//!
//! Status changes are conditional on the expected prior status, so a
//! terminal hold can never be moved again.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::model::{EpochMillis, Hold, HoldStatus};

use super::connection::Database;

const HOLD_COLUMNS: &str = "hold_id, club_id, member_id, created_at, expires_at, status";

const INSERT_HOLD: &str = r"
    INSERT INTO holds (hold_id, club_id, member_id, created_at, expires_at, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const DELETE_HOLD: &str = "DELETE FROM holds WHERE hold_id = ?1";

const TRANSITION_HOLD: &str = r"
    UPDATE holds SET status = ?3
    WHERE hold_id = ?1 AND status = ?2
";

const EXPIRE_IF_DUE: &str = r"
    UPDATE holds SET status = 'EXPIRED'
    WHERE hold_id = ?1 AND status = 'ACTIVE' AND expires_at <= ?2
";

const SELECT_DUE_HOLD_IDS: &str = r"
    SELECT hold_id FROM holds
    WHERE status = 'ACTIVE' AND expires_at <= ?1
    ORDER BY expires_at ASC, hold_id ASC
";

fn row_to_hold(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hold> {
    Ok(Hold {
        hold_id: row.get(0)?,
        club_id: row.get(1)?,
        member_id: row.get(2)?,
        created_at: row.get(3)?,
        expires_at: row.get(4)?,
        status: row.get(5)?,
    })
}

impl Database {
    /// Inserts a hold row.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a primary-key violation when the
    /// hold id is already taken.
    pub fn insert_hold(conn: &Connection, hold: &Hold) -> Result<()> {
        conn.execute(
            INSERT_HOLD,
            params![
                hold.hold_id,
                hold.club_id,
                hold.member_id,
                hold.created_at,
                hold.expires_at,
                hold.status,
            ],
        )?;
        Ok(())
    }

    /// Deletes a hold row. Only used to unwind a failed creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_hold(conn: &Connection, hold_id: &str) -> Result<bool> {
        Ok(conn.execute(DELETE_HOLD, params![hold_id])? == 1)
    }

    /// Retrieves a hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hold(conn: &Connection, hold_id: &str) -> Result<Option<Hold>> {
        let sql = format!("SELECT {HOLD_COLUMNS} FROM holds WHERE hold_id = ?1");
        Ok(conn.query_row(&sql, params![hold_id], row_to_hold).optional()?)
    }

    /// Moves a hold from `from` to `to` if it is still in `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn transition_hold(
        conn: &Connection,
        hold_id: &str,
        from: HoldStatus,
        to: HoldStatus,
    ) -> Result<bool> {
        Ok(conn.execute(TRANSITION_HOLD, params![hold_id, from, to])? == 1)
    }

    /// Marks an ACTIVE hold EXPIRED if `as_of` has reached its expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_hold_expired_if_due(
        conn: &Connection,
        hold_id: &str,
        as_of: EpochMillis,
    ) -> Result<bool> {
        Ok(conn.execute(EXPIRE_IF_DUE, params![hold_id, as_of])? == 1)
    }

    /// Lists ids of ACTIVE holds with `expires_at <= as_of`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_hold_ids_due(conn: &Connection, as_of: EpochMillis) -> Result<Vec<String>> {
        let mut stmt = conn.prepare_cached(SELECT_DUE_HOLD_IDS)?;
        let ids = stmt
            .query_map(params![as_of], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, rusqlite::Error>>()?;
        Ok(ids)
    }

    /// Lists holds, optionally filtered by status, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_holds(conn: &Connection, status: Option<HoldStatus>) -> Result<Vec<Hold>> {
        let sql = format!(
            "SELECT {HOLD_COLUMNS} FROM holds WHERE ?1 IS NULL OR status = ?1 \
             ORDER BY created_at ASC, hold_id ASC"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let holds = stmt
            .query_map(params![status], row_to_hold)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(holds)
    }
}
