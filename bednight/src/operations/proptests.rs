//! Property-based tests for the hold lifecycle.
//!
//! Random sequences of hold requests, cancellations, expiries and
//! confirmations over a small inventory, checked against the ledger rules
//! after every step.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::database::test_util::{create_test_database, night, seed};
use crate::database::Database;
use crate::model::{BedNightStatus, HoldSelection, HoldStatus};

use super::{BookingFinalizer, ConfirmHoldCommand, CreateHoldCommand, HoldManager};

const BEDS: &[&str] = &["bed-a", "bed-b", "bed-c"];
const NIGHTS: &[&str] = &["2026-01-10", "2026-01-11"];
const GUESTS: &[&str] = &["g-1", "g-2", "g-3", "g-4"];

#[derive(Debug, Clone)]
enum Step {
    Create {
        selections: Vec<(usize, usize, usize)>,
        expires_at: i64,
    },
    Cancel(usize),
    Expire(usize, i64),
    Confirm(usize, i64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (
            prop::collection::vec((0..BEDS.len(), 0..NIGHTS.len(), 0..GUESTS.len()), 0..4),
            1_000i64..10_000,
        )
            .prop_map(|(selections, expires_at)| Step::Create { selections, expires_at }),
        1 => (0usize..8).prop_map(Step::Cancel),
        1 => ((0usize..8), 0i64..12_000).prop_map(|(h, t)| Step::Expire(h, t)),
        1 => ((0usize..8), 0i64..12_000).prop_map(|(h, t)| Step::Confirm(h, t)),
    ]
}

fn assert_ledger_rules(db: &Database) -> Result<(), TestCaseError> {
    let conn = db.connection();
    let audit = Database::audit_ledger(conn).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert!(audit.is_clean(), "{:?}", audit.problems);

    let units = Database::units_in_range(conn, night(NIGHTS[0]), night(NIGHTS[NIGHTS.len() - 1]))
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let mut occupied = HashSet::new();
    for unit in units.iter().filter(|u| u.status != BedNightStatus::Available) {
        let guest = unit.guest_member_id.clone().unwrap_or_default();
        prop_assert!(
            occupied.insert((guest, unit.night_date)),
            "guest double-assigned on {}",
            unit.night_date
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        max_shrink_iters: 200,
        .. ProptestConfig::default()
    })]

    // Failed creates leave nothing behind and the ledger rules always hold
    #[test]
    fn lifecycle_preserves_ledger_rules(steps in prop::collection::vec(step_strategy(), 1..16)) {
        let mut db = create_test_database();
        seed(db.connection(), BEDS, NIGHTS[0], NIGHTS[NIGHTS.len() - 1]);

        for (i, step) in steps.into_iter().enumerate() {
            match step {
                Step::Create { selections, expires_at } => {
                    let hold_id = format!("h-{i}");
                    let command = CreateHoldCommand::new(&hold_id, "club", "member", 0, expires_at)
                        .with_selections(selections.iter().map(|&(b, n, g)| {
                            HoldSelection::new(BEDS[b], night(NIGHTS[n]), GUESTS[g]).unwrap()
                        }));
                    let result = HoldManager::create_hold(&mut db, &command).unwrap();
                    if result.is_success() {
                        prop_assert_eq!(
                            HoldManager::hold_units(&db, &hold_id).unwrap().len(),
                            selections.len()
                        );
                    } else {
                        prop_assert!(HoldManager::get_hold(&db, &hold_id).unwrap().is_none());
                        prop_assert!(HoldManager::hold_units(&db, &hold_id).unwrap().is_empty());
                    }
                }
                Step::Cancel(h) => {
                    let hold_id = format!("h-{h}");
                    let before = HoldManager::get_hold(&db, &hold_id).unwrap();
                    let cancelled = HoldManager::cancel_hold(&mut db, &hold_id).unwrap();
                    prop_assert_eq!(
                        cancelled,
                        before.is_some_and(|hold| hold.status == HoldStatus::Active)
                    );
                }
                Step::Expire(h, as_of) => {
                    let hold_id = format!("h-{h}");
                    let before = HoldManager::get_hold(&db, &hold_id).unwrap();
                    let expired = HoldManager::expire_hold_if_past_due(&mut db, &hold_id, as_of).unwrap();
                    prop_assert_eq!(expired, before.is_some_and(|hold| hold.is_due(as_of)));
                }
                Step::Confirm(h, at) => {
                    let hold_id = format!("h-{h}");
                    let before = HoldManager::hold_units(&db, &hold_id).unwrap();
                    let booking_id = format!("b-{i}");
                    let result = BookingFinalizer::confirm_hold(
                        &mut db,
                        &ConfirmHoldCommand::new(&hold_id, &booking_id, 100, at),
                    )
                    .unwrap();
                    if result.is_success() {
                        prop_assert_eq!(
                            Database::units_by_booking(db.connection(), &booking_id).unwrap().len(),
                            before.len()
                        );
                        prop_assert_eq!(
                            BookingFinalizer::booking_assignments(&db, &booking_id).unwrap().len(),
                            before.len()
                        );
                        prop_assert!(Database::held_units_for_hold(db.connection(), &hold_id)
                            .unwrap()
                            .is_empty());
                    }
                }
            }
            assert_ledger_rules(&db)?;
        }
    }

    // Terminal holds never change again
    #[test]
    fn terminal_holds_are_immutable(expires_at in 1_000i64..5_000, poke in 0i64..10_000) {
        let mut db = create_test_database();
        seed(db.connection(), BEDS, NIGHTS[0], NIGHTS[0]);
        let command = CreateHoldCommand::new("h", "club", "member", 0, expires_at)
            .with_selection(HoldSelection::new(BEDS[0], night(NIGHTS[0]), GUESTS[0]).unwrap());
        prop_assert!(HoldManager::create_hold(&mut db, &command).unwrap().is_success());
        prop_assert!(HoldManager::cancel_hold(&mut db, "h").unwrap());

        prop_assert!(!HoldManager::cancel_hold(&mut db, "h").unwrap());
        prop_assert!(!HoldManager::expire_hold_if_past_due(&mut db, "h", poke).unwrap());
        let confirm = BookingFinalizer::confirm_hold(
            &mut db,
            &ConfirmHoldCommand::new("h", "b", 1, poke),
        )
        .unwrap();
        prop_assert!(!confirm.is_success());
        prop_assert_eq!(
            HoldManager::get_hold(&db, "h").unwrap().unwrap().status,
            HoldStatus::Cancelled
        );
        prop_assert!(HoldManager::hold_units(&db, "h").unwrap().is_empty());
    }
}
