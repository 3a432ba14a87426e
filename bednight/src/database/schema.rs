//! Database schema definitions and SQL constants.
//!
//! This module contains the table and index definitions for the bed-night
//! ledger, holds, bookings and booking night assignments.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the bed night ledger.
///
/// One row per `(bed_id, night_date)`. Rows are seeded once and never
/// deleted; only the status and owner columns change.
pub const CREATE_BED_NIGHTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bed_nights (
        bed_id TEXT NOT NULL,
        night_date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'AVAILABLE'
            CHECK (status IN ('AVAILABLE', 'HELD', 'BOOKED')),
        hold_id TEXT,
        booking_id TEXT,
        guest_member_id TEXT,
        PRIMARY KEY (bed_id, night_date)
    )";

/// A guest occupies at most one bed per night among held and booked units.
pub const CREATE_GUEST_NIGHT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_bed_nights_guest_night
    ON bed_nights(guest_member_id, night_date)
    WHERE status IN ('HELD', 'BOOKED')";

/// SQL statement to create an index on the owning hold.
pub const CREATE_BED_NIGHTS_HOLD_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bed_nights_hold ON bed_nights(hold_id)";

/// SQL statement to create an index on the owning booking.
pub const CREATE_BED_NIGHTS_BOOKING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bed_nights_booking ON bed_nights(booking_id)";

/// SQL statement to create an index for date range scans.
pub const CREATE_BED_NIGHTS_NIGHT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bed_nights_night ON bed_nights(night_date, bed_id)";

/// SQL statement to create the holds table.
pub const CREATE_HOLDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS holds (
        hold_id TEXT PRIMARY KEY NOT NULL,
        club_id TEXT NOT NULL,
        member_id TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        expires_at INTEGER NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('ACTIVE', 'EXPIRED', 'CONFIRMED', 'CANCELLED'))
    )";

/// SQL statement to create an index used by the expiry sweep.
pub const CREATE_HOLDS_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_holds_status_expiry ON holds(status, expires_at)";

/// SQL statement to create the bookings table.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        booking_id TEXT PRIMARY KEY NOT NULL,
        club_id TEXT NOT NULL,
        member_id TEXT NOT NULL,
        total_amount INTEGER NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('CONFIRMED', 'CANCELLED')),
        confirmed_at INTEGER NOT NULL
    )";

/// SQL statement to create the booking night assignment snapshot table.
pub const CREATE_BOOKING_NIGHTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS booking_nights (
        booking_id TEXT NOT NULL,
        bed_id TEXT NOT NULL,
        night_date TEXT NOT NULL,
        guest_member_id TEXT NOT NULL,
        PRIMARY KEY (booking_id, bed_id, night_date)
    )";

/// A bed night is booked at most once.
pub const CREATE_BOOKING_NIGHTS_BED_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_booking_nights_bed_night
    ON booking_nights(bed_id, night_date)";

/// A guest is booked into at most one bed per night.
pub const CREATE_BOOKING_NIGHTS_GUEST_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_booking_nights_guest_night
    ON booking_nights(guest_member_id, night_date)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Every table and index, in creation order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_METADATA_TABLE,
    CREATE_BED_NIGHTS_TABLE,
    CREATE_GUEST_NIGHT_INDEX,
    CREATE_BED_NIGHTS_HOLD_INDEX,
    CREATE_BED_NIGHTS_BOOKING_INDEX,
    CREATE_BED_NIGHTS_NIGHT_INDEX,
    CREATE_HOLDS_TABLE,
    CREATE_HOLDS_EXPIRY_INDEX,
    CREATE_BOOKINGS_TABLE,
    CREATE_BOOKING_NIGHTS_TABLE,
    CREATE_BOOKING_NIGHTS_BED_INDEX,
    CREATE_BOOKING_NIGHTS_GUEST_INDEX,
];
