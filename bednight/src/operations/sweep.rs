//! Expiry sweep for past-due holds.
//!
//! ## Transactional Semantics
//!
//! The sweep lists candidates once, then expires each hold in its own
//! transaction. A candidate that was confirmed or cancelled between the
//! listing and its expiry attempt is skipped, not counted. If an error occurs
//! midway, earlier expiries stay committed; re-running the sweep picks up
//! where it left off.

use serde::Serialize;

use crate::database::Database;
use crate::model::EpochMillis;
use crate::Result;

use super::holds::HoldManager;

/// Result of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    /// Hold ids that were due when the sweep started, soonest first.
    pub candidates: Vec<String>,
    /// Number of holds that actually transitioned to EXPIRED (zero in
    /// dry-run mode).
    pub expired_count: usize,
    /// The holds that transitioned.
    pub expired_hold_ids: Vec<String>,
}

/// Stateless expiry sweep. Safe to run on any schedule.
pub struct ExpirySweeper;

impl ExpirySweeper {
    /// Expires every ACTIVE hold whose expiry is at or before `as_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or any individual expiry fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bednight::database::{Database, DatabaseConfig};
    /// use bednight::operations::ExpirySweeper;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
    ///
    /// let preview = ExpirySweeper::sweep(&mut db, 60_000, true).unwrap();
    /// println!("{} hold(s) are due", preview.candidates.len());
    ///
    /// let result = ExpirySweeper::sweep(&mut db, 60_000, false).unwrap();
    /// println!("expired {}", result.expired_count);
    /// ```
    pub fn sweep(db: &mut Database, as_of: EpochMillis, dry_run: bool) -> Result<SweepResult> {
        let candidates = HoldManager::list_active_hold_ids_due_for_expiry(db, as_of)?;
        let mut result = SweepResult {
            candidates,
            ..SweepResult::default()
        };

        if dry_run {
            return Ok(result);
        }

        for hold_id in &result.candidates {
            if HoldManager::expire_hold_if_past_due(db, hold_id, as_of)? {
                result.expired_hold_ids.push(hold_id.clone());
            }
        }
        result.expired_count = result.expired_hold_ids.len();

        if !result.candidates.is_empty() {
            log::debug!(
                "sweep as of {as_of}: expired {} of {} candidate(s)",
                result.expired_count,
                result.candidates.len()
            );
        }
        Ok(result)
    }
}
