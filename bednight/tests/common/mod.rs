//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bednight::operations::{seed_units, SeedOptions};
use bednight::{
    BedNightUnit, CreateHoldCommand, CreateHoldResult, Database, DatabaseConfig, HoldManager,
    HoldSelection, NightDate,
};
use tempfile::TempDir;

/// A database file in its own temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct TestLedger {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestLedger {
    /// Creates an empty, schema-initialized database file.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bednight.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { _dir: dir, path }
    }

    /// Creates a database seeded with `beds` over the inclusive night range.
    pub fn seeded(beds: &[&str], start: &str, end: &str) -> Self {
        let ledger = Self::new();
        let mut db = ledger.open();
        seed_units(
            &mut db,
            &SeedOptions::new(
                beds.iter().map(ToString::to_string).collect(),
                night(start),
                night(end),
            ),
        )
        .unwrap();
        ledger
    }

    /// Opens a fresh connection to the database.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path).with_busy_timeout(Duration::from_secs(10)))
            .unwrap()
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses a night date.
pub fn night(s: &str) -> NightDate {
    s.parse().unwrap()
}

/// Builds a selection.
pub fn pick(bed: &str, night_date: &str, guest: &str) -> HoldSelection {
    HoldSelection::new(bed, night(night_date), guest).unwrap()
}

/// Places a hold for `member` created at t=0.
#[allow(dead_code)]
pub fn place_hold(
    db: &mut Database,
    hold_id: &str,
    expires_at: i64,
    selections: Vec<HoldSelection>,
) -> CreateHoldResult {
    let command =
        CreateHoldCommand::new(hold_id, "club", "member", 0, expires_at).with_selections(selections);
    HoldManager::create_hold(db, &command).unwrap()
}

/// Looks up one unit, panicking if it was never seeded.
#[allow(dead_code)]
pub fn unit(db: &Database, bed: &str, night_date: &str) -> BedNightUnit {
    Database::get_unit(db.connection(), bed, night(night_date))
        .unwrap()
        .unwrap()
}
