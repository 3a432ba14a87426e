//! Ledger and storage integrity checks.

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{Error, Result};

use super::connection::Database;

const SELECT_ORPHANED_HELD: &str = r"
    SELECT u.bed_id, u.night_date, u.hold_id, h.status
    FROM bed_nights u
    LEFT JOIN holds h ON h.hold_id = u.hold_id
    WHERE u.status = 'HELD' AND (h.hold_id IS NULL OR h.status <> 'ACTIVE')
    ORDER BY u.night_date ASC, u.bed_id ASC
";

const SELECT_ORPHANED_BOOKED: &str = r"
    SELECT u.bed_id, u.night_date, u.booking_id
    FROM bed_nights u
    LEFT JOIN bookings b ON b.booking_id = u.booking_id
    WHERE u.status = 'BOOKED' AND b.booking_id IS NULL
    ORDER BY u.night_date ASC, u.bed_id ASC
";

const SELECT_EMPTY_ACTIVE_HOLDS: &str = r"
    SELECT h.hold_id FROM holds h
    WHERE h.status = 'ACTIVE'
      AND NOT EXISTS (
          SELECT 1 FROM bed_nights u WHERE u.status = 'HELD' AND u.hold_id = h.hold_id
      )
    ORDER BY h.hold_id ASC
";

const COUNT_HOLDS: &str = "SELECT COUNT(*) FROM holds";

/// Findings of a ledger audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerAudit {
    /// Number of bed-night rows scanned.
    pub units_checked: usize,
    /// Number of hold rows in the store.
    pub holds_checked: usize,
    /// Human-readable description of each problem found.
    pub problems: Vec<String>,
}

impl LedgerAudit {
    /// Whether no problems were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Converts a dirty audit into [`Error::LedgerInvariantViolation`].
    ///
    /// # Errors
    ///
    /// Returns an error if any problem was found.
    pub fn into_result(self) -> Result<Self> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(Error::LedgerInvariantViolation {
                count: self.problems.len(),
            })
        }
    }
}

impl Database {
    /// Scans the ledger for rows breaking the ownership rules.
    ///
    /// Reports units whose owner columns disagree with their status, HELD
    /// units whose hold is missing or no longer ACTIVE, BOOKED units without a
    /// booking row, and ACTIVE holds that hold nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails. Problems found are reported in the
    /// returned [`LedgerAudit`], not as errors.
    pub fn audit_ledger(conn: &Connection) -> Result<LedgerAudit> {
        let mut audit = LedgerAudit::default();

        for unit in Database::list_units(conn)? {
            audit.units_checked += 1;
            if let Some(problem) = unit.ownership_problem() {
                audit.problems.push(problem);
            }
        }

        let mut stmt = conn.prepare(SELECT_ORPHANED_HELD)?;
        let orphaned_held = stmt
            .query_map([], |row| {
                let bed: String = row.get(0)?;
                let night: String = row.get(1)?;
                let hold: Option<String> = row.get(2)?;
                let status: Option<String> = row.get(3)?;
                Ok(format!(
                    "{bed} {night} is HELD by hold {} which is {}",
                    hold.as_deref().unwrap_or("<none>"),
                    status.as_deref().unwrap_or("missing")
                ))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        audit.problems.extend(orphaned_held);

        let mut stmt = conn.prepare(SELECT_ORPHANED_BOOKED)?;
        let orphaned_booked = stmt
            .query_map([], |row| {
                let bed: String = row.get(0)?;
                let night: String = row.get(1)?;
                let booking: Option<String> = row.get(2)?;
                Ok(format!(
                    "{bed} {night} is BOOKED by missing booking {}",
                    booking.as_deref().unwrap_or("<none>")
                ))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        audit.problems.extend(orphaned_booked);

        let mut stmt = conn.prepare(SELECT_EMPTY_ACTIVE_HOLDS)?;
        let empty_holds = stmt
            .query_map([], |row| {
                let hold: String = row.get(0)?;
                Ok(format!("hold {hold} is ACTIVE but holds no bed nights"))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        audit.problems.extend(empty_holds);

        let holds: i64 = conn.query_row(COUNT_HOLDS, [], |row| row.get(0))?;
        audit.holds_checked = usize::try_from(holds).unwrap_or_default();

        if !audit.is_clean() {
            log::warn!("ledger audit found {} problem(s)", audit.problems.len());
        }
        Ok(audit)
    }

    /// Runs `SQLite`'s own integrity check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports anything
    /// other than `ok`.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}
