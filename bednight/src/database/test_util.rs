//! Shared test utilities for unit tests.

use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::model::{Hold, HoldStatus, NightDate};

/// Creates a temporary test database that lives for the rest of the test run.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // keep the directory alive for the lifetime of the connection
    std::mem::forget(dir);

    db
}

/// Parses a night date.
///
/// # Panics
///
/// Panics if `s` is not a valid `YYYY-MM-DD` date.
#[must_use]
pub fn night(s: &str) -> NightDate {
    s.parse().unwrap()
}

/// Seeds AVAILABLE units for each bed over `start..=end`.
///
/// # Panics
///
/// Panics if a date is invalid or an insert fails.
pub fn seed(conn: &Connection, beds: &[&str], start: &str, end: &str) {
    for date in night(start).through(night(end)) {
        for bed in beds {
            Database::insert_unit_if_absent(conn, bed, date).unwrap();
        }
    }
}

/// Builds an ACTIVE hold for club `club` and member `member`.
#[must_use]
pub fn active_hold(hold_id: &str, created_at: i64, expires_at: i64) -> Hold {
    Hold {
        hold_id: hold_id.to_string(),
        club_id: "club".to_string(),
        member_id: "member".to_string(),
        created_at,
        expires_at,
        status: HoldStatus::Active,
    }
}
