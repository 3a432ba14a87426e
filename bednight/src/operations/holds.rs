//! Hold manager: create, cancel and expire time-boxed holds.
//!
//! ## Transactional Semantics
//!
//! Every operation runs in its own IMMEDIATE transaction. Hold creation is
//! all-or-nothing: when any selected unit cannot be claimed, the units
//! already moved are released and the hold row is deleted before the
//! transaction commits, so no partial hold is ever visible.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{is_unique_violation, Error, Result};
use crate::model::{BedNightUnit, EpochMillis, Hold, HoldSelection, HoldStatus};

use super::outcome::{CreateHoldFailure, CreateHoldResult};

/// Request to hold a set of bed nights.
///
/// # Examples
///
/// ```
/// use bednight::operations::CreateHoldCommand;
/// use bednight::HoldSelection;
///
/// let night = "2026-01-10".parse().unwrap();
/// let command = CreateHoldCommand::new("hold-1", "club-1", "member-1", 1_000, 5_000)
///     .with_selection(HoldSelection::new("bed-a", night, "guest-1").unwrap())
///     .with_selection(HoldSelection::new("bed-b", night, "guest-2").unwrap());
/// assert_eq!(command.selections.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHoldCommand {
    /// Caller-chosen hold id.
    pub hold_id: String,
    /// Club that owns the inventory.
    pub club_id: String,
    /// Requesting member.
    pub member_id: String,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Time at which the hold becomes due for expiry.
    pub expires_at: EpochMillis,
    /// Units to hold, with their guests.
    pub selections: Vec<HoldSelection>,
}

impl CreateHoldCommand {
    /// Creates a command with no selections.
    #[must_use]
    pub fn new(
        hold_id: impl Into<String>,
        club_id: impl Into<String>,
        member_id: impl Into<String>,
        created_at: EpochMillis,
        expires_at: EpochMillis,
    ) -> Self {
        Self {
            hold_id: hold_id.into(),
            club_id: club_id.into(),
            member_id: member_id.into(),
            created_at,
            expires_at,
            selections: Vec::new(),
        }
    }

    /// Adds one selection.
    #[must_use]
    pub fn with_selection(mut self, selection: HoldSelection) -> Self {
        self.selections.push(selection);
        self
    }

    /// Adds several selections.
    #[must_use]
    pub fn with_selections(mut self, selections: impl IntoIterator<Item = HoldSelection>) -> Self {
        self.selections.extend(selections);
        self
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("hold_id", &self.hold_id),
            ("club_id", &self.club_id),
            ("member_id", &self.member_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("{field} must not be empty"),
                });
            }
        }
        if self.expires_at < self.created_at {
            return Err(Error::Validation {
                field: "expires_at".into(),
                message: format!(
                    "expiry {} is before creation time {}",
                    self.expires_at, self.created_at
                ),
            });
        }
        Ok(())
    }

    fn has_repeated_guest_night(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.selections.len());
        !self
            .selections
            .iter()
            .all(|s| seen.insert((s.guest_member_id.as_str(), s.night_date)))
    }
}

/// Hold lifecycle operations.
///
/// All operations are static methods that work on a database instance.
pub struct HoldManager;

impl HoldManager {
    /// Holds every selected bed night for a new ACTIVE hold, or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for blank ids or an expiry before the
    /// creation time, [`Error::LockTimeout`] if the write lock cannot be
    /// taken, or a database error. Contention and request-shape problems are
    /// reported as [`CreateHoldResult::Failure`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bednight::database::{Database, DatabaseConfig};
    /// use bednight::operations::{CreateHoldCommand, HoldManager};
    /// use bednight::HoldSelection;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
    /// let night = "2026-01-10".parse().unwrap();
    /// let command = CreateHoldCommand::new("hold-1", "club-1", "member-1", 1_000, 901_000)
    ///     .with_selection(HoldSelection::new("bed-a", night, "guest-1").unwrap());
    ///
    /// let result = HoldManager::create_hold(&mut db, &command).unwrap();
    /// println!("{result:?}");
    /// ```
    pub fn create_hold(db: &mut Database, command: &CreateHoldCommand) -> Result<CreateHoldResult> {
        command.validate()?;

        if command.selections.is_empty() {
            return Ok(CreateHoldResult::failed(CreateHoldFailure::EmptySelection));
        }
        if command.has_repeated_guest_night() {
            return Ok(CreateHoldResult::failed(
                CreateHoldFailure::InvalidGuestAssignment,
            ));
        }

        let hold = Hold {
            hold_id: command.hold_id.clone(),
            club_id: command.club_id.clone(),
            member_id: command.member_id.clone(),
            created_at: command.created_at,
            expires_at: command.expires_at,
            status: HoldStatus::Active,
        };

        let tx = db.begin_transaction()?;

        match Database::insert_hold(&tx, &hold) {
            Ok(()) => {}
            Err(Error::Database(ref e)) if is_unique_violation(e) => {
                log::warn!("hold id {} is already in use", hold.hold_id);
                // dropping tx rolls back and leaves the existing hold untouched
                return Ok(CreateHoldResult::failed(CreateHoldFailure::DuplicateHoldId));
            }
            Err(e) => return Err(e),
        }

        for selection in &command.selections {
            let failure = match Database::try_move_to_held(
                &tx,
                &selection.bed_id,
                selection.night_date,
                &hold.hold_id,
                &selection.guest_member_id,
            ) {
                Ok(true) => continue,
                Ok(false) => CreateHoldFailure::BedNightUnavailable,
                Err(Error::GuestNightConflict { .. }) => CreateHoldFailure::InvalidGuestAssignment,
                Err(e) => return Err(e),
            };

            let released = Database::release_held(&tx, &hold.hold_id)?;
            Database::delete_hold(&tx, &hold.hold_id)?;
            tx.commit()?;
            log::debug!(
                "hold {} not created at {} {}: {failure} (released {released})",
                hold.hold_id,
                selection.bed_id,
                selection.night_date
            );
            return Ok(CreateHoldResult::failed(failure));
        }

        tx.commit()?;
        let held_count = command.selections.len();
        log::debug!(
            "hold {} created over {held_count} bed night(s), expires at {}",
            hold.hold_id,
            hold.expires_at
        );
        Ok(CreateHoldResult::Success {
            hold_id: hold.hold_id,
            held_count,
        })
    }

    /// Cancels an ACTIVE hold and releases its units.
    ///
    /// Returns `false` if the hold does not exist or is already terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn cancel_hold(db: &mut Database, hold_id: &str) -> Result<bool> {
        let tx = db.begin_transaction()?;
        if !Database::transition_hold(&tx, hold_id, HoldStatus::Active, HoldStatus::Cancelled)? {
            return Ok(false);
        }
        let released = Database::release_held(&tx, hold_id)?;
        tx.commit()?;
        log::debug!("hold {hold_id} cancelled, released {released} bed night(s)");
        Ok(true)
    }

    /// Expires an ACTIVE hold whose expiry is at or before `as_of`.
    ///
    /// Returns `false` if the hold does not exist, is terminal, or is not yet
    /// due.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn expire_hold_if_past_due(
        db: &mut Database,
        hold_id: &str,
        as_of: EpochMillis,
    ) -> Result<bool> {
        let tx = db.begin_transaction()?;
        let expired = expire_within(&tx, hold_id, as_of)?;
        tx.commit()?;
        Ok(expired)
    }

    /// Lists ACTIVE holds with `expires_at <= as_of`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_hold_ids_due_for_expiry(
        db: &Database,
        as_of: EpochMillis,
    ) -> Result<Vec<String>> {
        Database::active_hold_ids_due(db.connection(), as_of)
    }

    /// Looks up a hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hold(db: &Database, hold_id: &str) -> Result<Option<Hold>> {
        Database::get_hold(db.connection(), hold_id)
    }

    /// Lists the units a hold currently references.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn hold_units(db: &Database, hold_id: &str) -> Result<Vec<BedNightUnit>> {
        Database::units_by_hold(db.connection(), hold_id)
    }
}

/// Expires and releases a due hold inside the caller's transaction.
pub(crate) fn expire_within(conn: &Connection, hold_id: &str, as_of: EpochMillis) -> Result<bool> {
    if !Database::mark_hold_expired_if_due(conn, hold_id, as_of)? {
        return Ok(false);
    }
    let released = Database::release_held(conn, hold_id)?;
    log::debug!("hold {hold_id} expired as of {as_of}, released {released} bed night(s)");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, night, seed};
    use crate::model::BedNightStatus;

    fn select(bed: &str, date: &str, guest: &str) -> HoldSelection {
        HoldSelection::new(bed, night(date), guest).unwrap()
    }

    fn command(hold_id: &str, selections: Vec<HoldSelection>) -> CreateHoldCommand {
        CreateHoldCommand::new(hold_id, "club", "member", 1_000, 5_000).with_selections(selections)
    }

    #[test]
    fn test_create_hold_success() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");

        let result = HoldManager::create_hold(
            &mut db,
            &command(
                "h-1",
                vec![
                    select("bed-a", "2026-01-10", "guest-1"),
                    select("bed-b", "2026-01-10", "guest-2"),
                ],
            ),
        )
        .unwrap();
        assert_eq!(
            result,
            CreateHoldResult::Success {
                hold_id: "h-1".into(),
                held_count: 2
            }
        );

        let units = HoldManager::hold_units(&db, "h-1").unwrap();
        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| u.status == BedNightStatus::Held));
    }

    #[test]
    fn test_create_hold_empty_selection() {
        let mut db = create_test_database();
        let result = HoldManager::create_hold(&mut db, &command("h-1", vec![])).unwrap();
        assert_eq!(result.failure(), Some(CreateHoldFailure::EmptySelection));
        assert!(HoldManager::get_hold(&db, "h-1").unwrap().is_none());
    }

    #[test]
    fn test_create_hold_rejects_blank_ids_and_backwards_expiry() {
        let mut db = create_test_database();
        let selection = vec![select("bed-a", "2026-01-10", "guest-1")];

        let blank = CreateHoldCommand::new(" ", "club", "member", 0, 1)
            .with_selections(selection.clone());
        assert!(matches!(
            HoldManager::create_hold(&mut db, &blank),
            Err(Error::Validation { .. })
        ));

        let backwards =
            CreateHoldCommand::new("h-1", "club", "member", 10, 5).with_selections(selection);
        assert!(matches!(
            HoldManager::create_hold(&mut db, &backwards),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_create_hold_unavailable_unwinds() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");
        HoldManager::create_hold(
            &mut db,
            &command("first", vec![select("bed-b", "2026-01-10", "guest-9")]),
        )
        .unwrap();

        let result = HoldManager::create_hold(
            &mut db,
            &command(
                "second",
                vec![
                    select("bed-a", "2026-01-10", "guest-1"),
                    select("bed-b", "2026-01-10", "guest-2"),
                ],
            ),
        )
        .unwrap();
        assert_eq!(result.failure(), Some(CreateHoldFailure::BedNightUnavailable));

        assert!(HoldManager::get_hold(&db, "second").unwrap().is_none());
        assert!(HoldManager::hold_units(&db, "second").unwrap().is_empty());
        let bed_a = Database::get_unit(db.connection(), "bed-a", night("2026-01-10"))
            .unwrap()
            .unwrap();
        assert_eq!(bed_a.status, BedNightStatus::Available);
    }

    #[test]
    fn test_create_hold_unknown_unit_is_unavailable() {
        let mut db = create_test_database();
        let result = HoldManager::create_hold(
            &mut db,
            &command("h-1", vec![select("ghost", "2026-01-10", "guest-1")]),
        )
        .unwrap();
        assert_eq!(result.failure(), Some(CreateHoldFailure::BedNightUnavailable));
    }

    #[test]
    fn test_create_hold_guest_conflict_against_storage() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");
        HoldManager::create_hold(
            &mut db,
            &command("first", vec![select("bed-a", "2026-01-10", "guest-1")]),
        )
        .unwrap();

        let result = HoldManager::create_hold(
            &mut db,
            &command("second", vec![select("bed-b", "2026-01-10", "guest-1")]),
        )
        .unwrap();
        assert_eq!(
            result.failure(),
            Some(CreateHoldFailure::InvalidGuestAssignment)
        );
        assert!(HoldManager::get_hold(&db, "second").unwrap().is_none());
    }

    #[test]
    fn test_create_hold_duplicate_id_leaves_existing_hold() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");
        HoldManager::create_hold(
            &mut db,
            &command("h-1", vec![select("bed-a", "2026-01-10", "guest-1")]),
        )
        .unwrap();

        let result = HoldManager::create_hold(
            &mut db,
            &command("h-1", vec![select("bed-b", "2026-01-10", "guest-2")]),
        )
        .unwrap();
        assert_eq!(result.failure(), Some(CreateHoldFailure::DuplicateHoldId));

        let units = HoldManager::hold_units(&db, "h-1").unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].bed_id, "bed-a");
        assert_eq!(
            HoldManager::get_hold(&db, "h-1").unwrap().unwrap().status,
            HoldStatus::Active
        );
    }

    #[test]
    fn test_cancel_then_expire_is_noop() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a"], "2026-01-10", "2026-01-10");
        HoldManager::create_hold(
            &mut db,
            &command("h-1", vec![select("bed-a", "2026-01-10", "guest-1")]),
        )
        .unwrap();

        assert!(HoldManager::cancel_hold(&mut db, "h-1").unwrap());
        assert!(!HoldManager::expire_hold_if_past_due(&mut db, "h-1", 10_000).unwrap());
        assert_eq!(
            HoldManager::get_hold(&db, "h-1").unwrap().unwrap().status,
            HoldStatus::Cancelled
        );
    }

    #[test]
    fn test_cancel_unknown_hold() {
        let mut db = create_test_database();
        assert!(!HoldManager::cancel_hold(&mut db, "nope").unwrap());
    }

    #[test]
    fn test_expire_not_yet_due() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a"], "2026-01-10", "2026-01-10");
        HoldManager::create_hold(
            &mut db,
            &command("h-1", vec![select("bed-a", "2026-01-10", "guest-1")]),
        )
        .unwrap();

        assert!(!HoldManager::expire_hold_if_past_due(&mut db, "h-1", 4_999).unwrap());
        assert!(HoldManager::expire_hold_if_past_due(&mut db, "h-1", 5_000).unwrap());
        assert!(HoldManager::hold_units(&db, "h-1").unwrap().is_empty());
    }

    #[test]
    fn test_list_due_holds() {
        let mut db = create_test_database();
        seed(db.connection(), &["bed-a", "bed-b"], "2026-01-10", "2026-01-10");
        for (id, bed, expires_at) in [("late", "bed-a", 9_000), ("early", "bed-b", 3_000)] {
            let cmd = CreateHoldCommand::new(id, "club", "member", 0, expires_at)
                .with_selection(select(bed, "2026-01-10", id));
            HoldManager::create_hold(&mut db, &cmd).unwrap();
        }

        assert!(HoldManager::list_active_hold_ids_due_for_expiry(&db, 2_999)
            .unwrap()
            .is_empty());
        assert_eq!(
            HoldManager::list_active_hold_ids_due_for_expiry(&db, 9_000).unwrap(),
            vec!["early", "late"]
        );
    }
}
