//! Booking finalizer: turn an active, unexpired hold into a booking.
//!
//! The whole confirmation runs in one IMMEDIATE transaction. When the moved
//! unit count or the final hold transition disagrees with what was read at
//! the start, the transaction is dropped uncommitted and a
//! [`Error::ConsistencyFault`] is returned.

use crate::database::Database;
use crate::error::{is_unique_violation, Error, Result};
use crate::model::{Booking, BookingNightAssignment, BookingStatus, EpochMillis, HoldStatus};

use super::holds::expire_within;
use super::outcome::{ConfirmHoldFailure, ConfirmHoldResult};

/// Request to finalize a hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmHoldCommand {
    /// Hold to confirm.
    pub hold_id: String,
    /// Caller-chosen id for the new booking.
    pub booking_id: String,
    /// Amount charged, in minor currency units.
    pub total_amount: i64,
    /// Confirmation time.
    pub confirmed_at: EpochMillis,
}

impl ConfirmHoldCommand {
    /// Creates a confirmation request.
    #[must_use]
    pub fn new(
        hold_id: impl Into<String>,
        booking_id: impl Into<String>,
        total_amount: i64,
        confirmed_at: EpochMillis,
    ) -> Self {
        Self {
            hold_id: hold_id.into(),
            booking_id: booking_id.into(),
            total_amount,
            confirmed_at,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.booking_id.trim().is_empty() {
            return Err(Error::Validation {
                field: "booking_id".into(),
                message: "booking_id must not be empty".into(),
            });
        }
        if self.total_amount < 0 {
            return Err(Error::Validation {
                field: "total_amount".into(),
                message: format!("amount must not be negative, got {}", self.total_amount),
            });
        }
        Ok(())
    }
}

/// Converts holds into bookings.
pub struct BookingFinalizer;

impl BookingFinalizer {
    /// Confirms a hold, creating the booking and its night assignments.
    ///
    /// A hold whose expiry is before `confirmed_at` is expired (and its units
    /// released) as part of failing with [`ConfirmHoldFailure::HoldExpired`];
    /// that is the only failure that writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConsistencyFault`] if the ledger changed underneath
    /// the transaction, [`Error::Validation`] for a blank or reused booking id
    /// or a negative amount, or an infrastructure error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bednight::database::{Database, DatabaseConfig};
    /// use bednight::operations::{BookingFinalizer, ConfirmHoldCommand, ConfirmHoldResult};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
    /// let command = ConfirmHoldCommand::new("hold-1", "booking-1", 42_000, 15_000);
    ///
    /// match BookingFinalizer::confirm_hold(&mut db, &command).unwrap() {
    ///     ConfirmHoldResult::Success { booked_nights, .. } => println!("booked {booked_nights}"),
    ///     ConfirmHoldResult::Failure { reason } => println!("not booked: {reason}"),
    /// }
    /// ```
    pub fn confirm_hold(
        db: &mut Database,
        command: &ConfirmHoldCommand,
    ) -> Result<ConfirmHoldResult> {
        command.validate()?;
        let hold_id = command.hold_id.as_str();

        let tx = db.begin_transaction()?;

        let Some(hold) = Database::get_hold(&tx, hold_id)? else {
            return Ok(ConfirmHoldResult::failed(ConfirmHoldFailure::HoldNotFound));
        };
        if hold.status != HoldStatus::Active {
            return Ok(ConfirmHoldResult::failed(ConfirmHoldFailure::HoldNotActive));
        }

        if command.confirmed_at > hold.expires_at {
            if !expire_within(&tx, hold_id, command.confirmed_at)? {
                return Err(fault(
                    hold_id,
                    "hold read as ACTIVE and past due but could not be expired",
                ));
            }
            tx.commit()?;
            return Ok(ConfirmHoldResult::failed(ConfirmHoldFailure::HoldExpired));
        }

        let held = Database::held_units_for_hold(&tx, hold_id)?;
        if held.is_empty() {
            return Ok(ConfirmHoldResult::failed(ConfirmHoldFailure::NoHeldNights));
        }

        let booking = Booking {
            booking_id: command.booking_id.clone(),
            club_id: hold.club_id.clone(),
            member_id: hold.member_id.clone(),
            total_amount: command.total_amount,
            status: BookingStatus::Confirmed,
            confirmed_at: command.confirmed_at,
        };
        match Database::insert_booking(&tx, &booking) {
            Ok(()) => {}
            Err(Error::Database(ref e)) if is_unique_violation(e) => {
                return Err(Error::Validation {
                    field: "booking_id".into(),
                    message: format!("booking id {} is already in use", booking.booking_id),
                });
            }
            Err(e) => return Err(e),
        }

        for unit in &held {
            let guest_member_id = unit.guest_member_id.clone().unwrap_or_else(|| {
                log::warn!(
                    "{} {} held by {hold_id} has no guest; assigning requester {}",
                    unit.bed_id,
                    unit.night_date,
                    hold.member_id
                );
                hold.member_id.clone()
            });
            Database::insert_assignment(
                &tx,
                &BookingNightAssignment {
                    booking_id: booking.booking_id.clone(),
                    bed_id: unit.bed_id.clone(),
                    night_date: unit.night_date,
                    guest_member_id,
                },
            )?;
        }

        let moved = Database::move_held_to_booked(&tx, hold_id, &booking.booking_id)?;
        if moved != held.len() {
            return Err(fault(
                hold_id,
                format!("moved {moved} of {} held bed nights to BOOKED", held.len()),
            ));
        }

        if !Database::transition_hold(&tx, hold_id, HoldStatus::Active, HoldStatus::Confirmed)? {
            return Err(fault(hold_id, "hold left ACTIVE before it could be confirmed"));
        }

        tx.commit()?;
        log::debug!(
            "hold {hold_id} confirmed as booking {} over {moved} bed night(s)",
            booking.booking_id
        );
        Ok(ConfirmHoldResult::Success {
            booking_id: booking.booking_id,
            booked_nights: moved,
        })
    }

    /// Retrieves a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(db: &Database, booking_id: &str) -> Result<Option<Booking>> {
        Database::get_booking(db.connection(), booking_id)
    }

    /// Lists the night assignments recorded for a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_assignments(
        db: &Database,
        booking_id: &str,
    ) -> Result<Vec<BookingNightAssignment>> {
        Database::booking_assignments(db.connection(), booking_id)
    }
}

fn fault(hold_id: &str, details: impl Into<String>) -> Error {
    let err = Error::consistency("confirm_hold", details);
    log::error!("hold {hold_id}: {err}");
    err
}
