//! Bed-night inventory ledger.
//!
//! Conditional mutation primitives over `bed_nights`. Every function takes a
//! `&Connection` so it runs inside the caller's transaction (a
//! `rusqlite::Transaction` derefs to `Connection`). Each mutation is guarded
//! by the expected prior state and reports the affected-row count; a zero
//! count means another writer got there first.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{is_unique_violation, Error, Result};
use crate::model::{BedNightUnit, NightDate};

use super::connection::Database;

const UNIT_COLUMNS: &str = "bed_id, night_date, status, hold_id, booking_id, guest_member_id";

const INSERT_UNIT_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO bed_nights (bed_id, night_date, status)
    VALUES (?1, ?2, 'AVAILABLE')
";

const MOVE_TO_HELD: &str = r"
    UPDATE bed_nights
    SET status = 'HELD', hold_id = ?3, guest_member_id = ?4, booking_id = NULL
    WHERE bed_id = ?1 AND night_date = ?2
      AND status = 'AVAILABLE' AND hold_id IS NULL AND booking_id IS NULL
";

const RELEASE_HELD: &str = r"
    UPDATE bed_nights
    SET status = 'AVAILABLE', hold_id = NULL, booking_id = NULL, guest_member_id = NULL
    WHERE status = 'HELD' AND hold_id = ?1
";

const MOVE_HELD_TO_BOOKED: &str = r"
    UPDATE bed_nights
    SET status = 'BOOKED', booking_id = ?2, hold_id = NULL
    WHERE status = 'HELD' AND hold_id = ?1
";

fn row_to_unit(row: &rusqlite::Row<'_>) -> rusqlite::Result<BedNightUnit> {
    Ok(BedNightUnit {
        bed_id: row.get(0)?,
        night_date: row.get(1)?,
        status: row.get(2)?,
        hold_id: row.get(3)?,
        booking_id: row.get(4)?,
        guest_member_id: row.get(5)?,
    })
}

fn query_units(
    conn: &Connection,
    filter: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<BedNightUnit>> {
    let sql = format!(
        "SELECT {UNIT_COLUMNS} FROM bed_nights WHERE {filter} ORDER BY night_date ASC, bed_id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let units = stmt
        .query_map(params, row_to_unit)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
    Ok(units)
}

impl Database {
    /// Seeds an AVAILABLE unit unless `(bed_id, night_date)` already exists.
    ///
    /// Returns whether a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_unit_if_absent(
        conn: &Connection,
        bed_id: &str,
        night_date: NightDate,
    ) -> Result<bool> {
        let inserted = conn.execute(INSERT_UNIT_IF_ABSENT, params![bed_id, night_date])?;
        Ok(inserted == 1)
    }

    /// Moves an AVAILABLE, unowned unit to HELD for `hold_id`.
    ///
    /// Returns `false` without mutating anything when the unit is missing or
    /// not in the expected prior state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GuestNightConflict`] when the guest already occupies
    /// another held or booked unit on the same night, or a database error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bednight::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
    /// let night = "2026-01-10".parse().unwrap();
    ///
    /// let tx = db.begin_transaction().unwrap();
    /// let moved = Database::try_move_to_held(&tx, "bed-a", night, "hold-1", "guest-1").unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn try_move_to_held(
        conn: &Connection,
        bed_id: &str,
        night_date: NightDate,
        hold_id: &str,
        guest_member_id: &str,
    ) -> Result<bool> {
        match conn.execute(
            MOVE_TO_HELD,
            params![bed_id, night_date, hold_id, guest_member_id],
        ) {
            Ok(changed) => Ok(changed == 1),
            Err(e) if is_unique_violation(&e) => Err(Error::GuestNightConflict {
                guest_member_id: guest_member_id.to_string(),
                night_date: night_date.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns every unit HELD by `hold_id` to AVAILABLE with owners cleared.
    ///
    /// Idempotent; returns the number of units released.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn release_held(conn: &Connection, hold_id: &str) -> Result<usize> {
        Ok(conn.execute(RELEASE_HELD, params![hold_id])?)
    }

    /// Moves every unit HELD by `hold_id` to BOOKED under `booking_id`.
    ///
    /// The guest is retained. Returns the number of units moved; the caller
    /// compares it against the count it expected.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn move_held_to_booked(conn: &Connection, hold_id: &str, booking_id: &str) -> Result<usize> {
        Ok(conn.execute(MOVE_HELD_TO_BOOKED, params![hold_id, booking_id])?)
    }

    /// Looks up a single unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_unit(
        conn: &Connection,
        bed_id: &str,
        night_date: NightDate,
    ) -> Result<Option<BedNightUnit>> {
        let sql =
            format!("SELECT {UNIT_COLUMNS} FROM bed_nights WHERE bed_id = ?1 AND night_date = ?2");
        Ok(conn
            .query_row(&sql, params![bed_id, night_date], row_to_unit)
            .optional()?)
    }

    /// Lists every unit referencing `hold_id`, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn units_by_hold(conn: &Connection, hold_id: &str) -> Result<Vec<BedNightUnit>> {
        query_units(conn, "hold_id = ?1", params![hold_id])
    }

    /// Lists units currently HELD by `hold_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn held_units_for_hold(conn: &Connection, hold_id: &str) -> Result<Vec<BedNightUnit>> {
        query_units(conn, "status = 'HELD' AND hold_id = ?1", params![hold_id])
    }

    /// Lists units owned by `booking_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn units_by_booking(conn: &Connection, booking_id: &str) -> Result<Vec<BedNightUnit>> {
        query_units(conn, "booking_id = ?1", params![booking_id])
    }

    /// Lists every unit in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_units(conn: &Connection) -> Result<Vec<BedNightUnit>> {
        query_units(conn, "1 = 1", params![])
    }

    /// Lists units whose night falls in `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn units_in_range(
        conn: &Connection,
        start: NightDate,
        end: NightDate,
    ) -> Result<Vec<BedNightUnit>> {
        query_units(conn, "night_date >= ?1 AND night_date <= ?2", params![start, end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, night, seed};
    use crate::model::BedNightStatus;

    #[test]
    fn test_insert_unit_if_absent() {
        let db = create_test_database();
        let conn = db.connection();

        assert!(Database::insert_unit_if_absent(conn, "bed-a", night("2026-01-10")).unwrap());
        assert!(!Database::insert_unit_if_absent(conn, "bed-a", night("2026-01-10")).unwrap());

        let unit = Database::get_unit(conn, "bed-a", night("2026-01-10"))
            .unwrap()
            .unwrap();
        assert_eq!(unit, BedNightUnit::available("bed-a", night("2026-01-10")));
    }

    #[test]
    fn test_try_move_to_held_once() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn, &["bed-a"], "2026-01-10", "2026-01-10");

        assert!(
            Database::try_move_to_held(conn, "bed-a", night("2026-01-10"), "h-1", "g-1").unwrap()
        );
        assert!(
            !Database::try_move_to_held(conn, "bed-a", night("2026-01-10"), "h-2", "g-2").unwrap()
        );

        let unit = Database::get_unit(conn, "bed-a", night("2026-01-10"))
            .unwrap()
            .unwrap();
        assert_eq!(unit.status, BedNightStatus::Held);
        assert_eq!(unit.hold_id.as_deref(), Some("h-1"));
        assert_eq!(unit.guest_member_id.as_deref(), Some("g-1"));
        assert!(unit.booking_id.is_none());
    }

    #[test]
    fn test_try_move_to_held_missing_unit() {
        let db = create_test_database();
        assert!(!Database::try_move_to_held(
            db.connection(),
            "ghost",
            night("2026-01-10"),
            "h-1",
            "g-1"
        )
        .unwrap());
    }

    #[test]
    fn test_try_move_to_held_guest_conflict() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn, &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");

        Database::try_move_to_held(conn, "bed-a", night("2026-01-10"), "h-1", "g-1").unwrap();
        let err = Database::try_move_to_held(conn, "bed-b", night("2026-01-10"), "h-2", "g-1")
            .unwrap_err();
        assert!(matches!(err, Error::GuestNightConflict { .. }));

        // same guest on a different night is fine
        seed(conn, &["bed-b"], "2026-01-11", "2026-01-11");
        assert!(
            Database::try_move_to_held(conn, "bed-b", night("2026-01-11"), "h-2", "g-1").unwrap()
        );
    }

    #[test]
    fn test_release_held_is_idempotent() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn, &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");
        Database::try_move_to_held(conn, "bed-a", night("2026-01-10"), "h-1", "g-1").unwrap();
        Database::try_move_to_held(conn, "bed-b", night("2026-01-10"), "h-1", "g-2").unwrap();

        assert_eq!(Database::release_held(conn, "h-1").unwrap(), 2);
        assert_eq!(Database::release_held(conn, "h-1").unwrap(), 0);

        for unit in Database::units_in_range(conn, night("2026-01-10"), night("2026-01-10")).unwrap()
        {
            assert_eq!(unit.status, BedNightStatus::Available);
            assert!(unit.ownership_problem().is_none());
        }
    }

    #[test]
    fn test_move_held_to_booked() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn, &["bed-a"], "2026-01-10", "2026-01-11");
        Database::try_move_to_held(conn, "bed-a", night("2026-01-10"), "h-1", "g-1").unwrap();
        Database::try_move_to_held(conn, "bed-a", night("2026-01-11"), "h-1", "g-1").unwrap();

        assert_eq!(Database::move_held_to_booked(conn, "h-1", "b-1").unwrap(), 2);
        assert!(Database::held_units_for_hold(conn, "h-1").unwrap().is_empty());

        let booked = Database::units_by_booking(conn, "b-1").unwrap();
        assert_eq!(booked.len(), 2);
        for unit in &booked {
            assert_eq!(unit.status, BedNightStatus::Booked);
            assert!(unit.hold_id.is_none());
            assert_eq!(unit.guest_member_id.as_deref(), Some("g-1"));
        }

        // booked units are not released by their former hold
        assert_eq!(Database::release_held(conn, "h-1").unwrap(), 0);
    }

    #[test]
    fn test_units_in_range_ordering() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn, &["bed-b", "bed-a"], "2026-01-10", "2026-01-12");

        let units = Database::units_in_range(conn, night("2026-01-11"), night("2026-01-12")).unwrap();
        let keys: Vec<(String, String)> = units
            .iter()
            .map(|u| (u.night_date.to_string(), u.bed_id.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2026-01-11".into(), "bed-a".into()),
                ("2026-01-11".into(), "bed-b".into()),
                ("2026-01-12".into(), "bed-a".into()),
                ("2026-01-12".into(), "bed-b".into()),
            ]
        );
    }

    #[test]
    fn test_list_units_covers_whole_ledger() {
        let db = create_test_database();
        let conn = db.connection();
        assert!(Database::list_units(conn).unwrap().is_empty());

        seed(conn, &["bed-b", "bed-a"], "2026-01-10", "2026-01-11");
        let units = Database::list_units(conn).unwrap();
        assert_eq!(units.len(), 4);
        assert_eq!(units[0].bed_id, "bed-a");
        assert_eq!(units[0].night_date, night("2026-01-10"));
        assert_eq!(units[3].night_date, night("2026-01-11"));
    }
}
