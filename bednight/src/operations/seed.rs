//! Inventory seeding.
//!
//! Bed-night rows are created once and never deleted. Seeding is idempotent:
//! rows that already exist keep their current status and owners.

use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::NightDate;

/// Beds and the inclusive night range to seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Beds to seed.
    pub bed_ids: Vec<String>,
    /// First night.
    pub start: NightDate,
    /// Last night, inclusive.
    pub end: NightDate,
}

impl SeedOptions {
    /// Creates seed options.
    #[must_use]
    pub fn new(bed_ids: Vec<String>, start: NightDate, end: NightDate) -> Self {
        Self {
            bed_ids,
            start,
            end,
        }
    }
}

/// Result of seeding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    /// Rows created.
    pub inserted: usize,
    /// Rows that already existed.
    pub existing: usize,
}

/// Seeds AVAILABLE units for every bed on every night in the range.
///
/// Runs in a single transaction.
///
/// # Errors
///
/// Returns [`Error::Validation`] if no bed is given, a bed id is blank, or
/// `end` is before `start`; otherwise any database error.
///
/// # Examples
///
/// ```no_run
/// use bednight::database::{Database, DatabaseConfig};
/// use bednight::operations::{seed_units, SeedOptions};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
/// let options = SeedOptions::new(
///     vec!["bed-a".into(), "bed-b".into()],
///     "2026-01-10".parse().unwrap(),
///     "2026-01-12".parse().unwrap(),
/// );
/// let result = seed_units(&mut db, &options).unwrap();
/// assert_eq!(result.inserted + result.existing, 6);
/// ```
pub fn seed_units(db: &mut Database, options: &SeedOptions) -> Result<SeedResult> {
    if options.bed_ids.is_empty() {
        return Err(Error::Validation {
            field: "bed_ids".into(),
            message: "at least one bed is required".into(),
        });
    }
    if let Some(blank) = options.bed_ids.iter().position(|b| b.trim().is_empty()) {
        return Err(Error::Validation {
            field: "bed_ids".into(),
            message: format!("bed id at position {} is blank", blank + 1),
        });
    }
    if options.end < options.start {
        return Err(Error::Validation {
            field: "end".into(),
            message: format!("{} is before {}", options.end, options.start),
        });
    }

    let tx = db.begin_transaction()?;
    let mut result = SeedResult::default();
    for night in options.start.through(options.end) {
        for bed_id in &options.bed_ids {
            if Database::insert_unit_if_absent(&tx, bed_id.trim(), night)? {
                result.inserted += 1;
            } else {
                result.existing += 1;
            }
        }
    }
    tx.commit()?;

    log::debug!(
        "seeded {} bed night(s) from {} to {} ({} already present)",
        result.inserted,
        options.start,
        options.end,
        result.existing
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, night};
    use crate::model::BedNightStatus;

    fn options(beds: &[&str], start: &str, end: &str) -> SeedOptions {
        SeedOptions::new(
            beds.iter().map(ToString::to_string).collect(),
            night(start),
            night(end),
        )
    }

    #[test]
    fn test_seed_range() {
        let mut db = create_test_database();
        let result = seed_units(&mut db, &options(&["a", "b"], "2026-01-30", "2026-02-01")).unwrap();
        assert_eq!(result, SeedResult { inserted: 6, existing: 0 });

        let units =
            Database::units_in_range(db.connection(), night("2026-01-01"), night("2026-12-31"))
                .unwrap();
        assert_eq!(units.len(), 6);
        assert!(units.iter().all(|u| u.status == BedNightStatus::Available));
    }

    #[test]
    fn test_seed_is_idempotent_and_preserves_state() {
        let mut db = create_test_database();
        seed_units(&mut db, &options(&["a"], "2026-01-10", "2026-01-10")).unwrap();
        Database::try_move_to_held(db.connection(), "a", night("2026-01-10"), "h", "g").unwrap();

        let result = seed_units(&mut db, &options(&["a"], "2026-01-10", "2026-01-11")).unwrap();
        assert_eq!(result, SeedResult { inserted: 1, existing: 1 });

        let unit = Database::get_unit(db.connection(), "a", night("2026-01-10"))
            .unwrap()
            .unwrap();
        assert_eq!(unit.status, BedNightStatus::Held);
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        let mut db = create_test_database();
        assert!(seed_units(&mut db, &options(&[], "2026-01-10", "2026-01-10")).is_err());
        assert!(seed_units(&mut db, &options(&["a", " "], "2026-01-10", "2026-01-10")).is_err());
        assert!(seed_units(&mut db, &options(&["a"], "2026-01-11", "2026-01-10")).is_err());
    }
}
