//! Booking and booking night assignment rows. Both are written once.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::model::{Booking, BookingNightAssignment};

use super::connection::Database;

const BOOKING_COLUMNS: &str =
    "booking_id, club_id, member_id, total_amount, status, confirmed_at";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (booking_id, club_id, member_id, total_amount, status, confirmed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const INSERT_ASSIGNMENT: &str = r"
    INSERT INTO booking_nights (booking_id, bed_id, night_date, guest_member_id)
    VALUES (?1, ?2, ?3, ?4)
";

const SELECT_ASSIGNMENTS: &str = r"
    SELECT booking_id, bed_id, night_date, guest_member_id
    FROM booking_nights
    WHERE booking_id = ?1
    ORDER BY night_date ASC, bed_id ASC
";

fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        booking_id: row.get(0)?,
        club_id: row.get(1)?,
        member_id: row.get(2)?,
        total_amount: row.get(3)?,
        status: row.get(4)?,
        confirmed_at: row.get(5)?,
    })
}

impl Database {
    /// Inserts a booking row.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a primary-key violation when the
    /// booking id is already taken.
    pub fn insert_booking(conn: &Connection, booking: &Booking) -> Result<()> {
        conn.execute(
            INSERT_BOOKING,
            params![
                booking.booking_id,
                booking.club_id,
                booking.member_id,
                booking.total_amount,
                booking.status,
                booking.confirmed_at,
            ],
        )?;
        Ok(())
    }

    /// Inserts one booking night assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_assignment(conn: &Connection, assignment: &BookingNightAssignment) -> Result<()> {
        conn.execute(
            INSERT_ASSIGNMENT,
            params![
                assignment.booking_id,
                assignment.bed_id,
                assignment.night_date,
                assignment.guest_member_id,
            ],
        )?;
        Ok(())
    }

    /// Retrieves a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(conn: &Connection, booking_id: &str) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = ?1");
        Ok(conn
            .query_row(&sql, params![booking_id], row_to_booking)
            .optional()?)
    }

    /// Lists the assignments written for a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_assignments(
        conn: &Connection,
        booking_id: &str,
    ) -> Result<Vec<BookingNightAssignment>> {
        let mut stmt = conn.prepare_cached(SELECT_ASSIGNMENTS)?;
        let assignments = stmt
            .query_map(params![booking_id], |row| {
                Ok(BookingNightAssignment {
                    booking_id: row.get(0)?,
                    bed_id: row.get(1)?,
                    night_date: row.get(2)?,
                    guest_member_id: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(assignments)
    }

    /// Lists all bookings, most recently confirmed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(conn: &Connection) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY confirmed_at DESC, booking_id ASC"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let bookings = stmt
            .query_map([], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }
}
