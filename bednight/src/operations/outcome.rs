//! Typed outcomes for hold creation and confirmation.
//!
//! Business failures are values, not errors: callers match on every reason.
//! Only infrastructure failures and consistency faults travel through
//! [`crate::Error`].

use std::fmt;

use serde::Serialize;

/// Why a hold could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateHoldFailure {
    /// The request selected no bed nights.
    EmptySelection,
    /// A guest would occupy two beds on one night, either within the request
    /// or against a unit already held or booked.
    InvalidGuestAssignment,
    /// A selected bed night is missing or already claimed.
    BedNightUnavailable,
    /// The hold id is already in use.
    DuplicateHoldId,
}

impl CreateHoldFailure {
    /// Stable upper-case code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::InvalidGuestAssignment => "INVALID_GUEST_ASSIGNMENT",
            Self::BedNightUnavailable => "BED_NIGHT_UNAVAILABLE",
            Self::DuplicateHoldId => "DUPLICATE_HOLD_ID",
        }
    }
}

impl fmt::Display for CreateHoldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptySelection => "no bed nights were selected",
            Self::InvalidGuestAssignment => "a guest cannot occupy two beds on the same night",
            Self::BedNightUnavailable => "a selected bed night is not available",
            Self::DuplicateHoldId => "the hold id is already in use",
        };
        f.write_str(text)
    }
}

/// Outcome of creating a hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreateHoldResult {
    /// Every selected unit is now HELD by the hold.
    Success {
        /// The new hold.
        hold_id: String,
        /// Number of units held.
        held_count: usize,
    },
    /// Nothing was written.
    Failure {
        /// Why.
        reason: CreateHoldFailure,
    },
}

impl CreateHoldResult {
    pub(crate) const fn failed(reason: CreateHoldFailure) -> Self {
        Self::Failure { reason }
    }

    /// Whether the hold was created.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<CreateHoldFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(*reason),
        }
    }
}

/// Why a hold could not be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmHoldFailure {
    /// No hold has that id.
    HoldNotFound,
    /// The hold is already terminal.
    HoldNotActive,
    /// The hold expired before the confirmation time; it has now been
    /// expired and its units released.
    HoldExpired,
    /// The hold is active but holds nothing.
    NoHeldNights,
}

impl ConfirmHoldFailure {
    /// Stable upper-case code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::HoldNotFound => "HOLD_NOT_FOUND",
            Self::HoldNotActive => "HOLD_NOT_ACTIVE",
            Self::HoldExpired => "HOLD_EXPIRED",
            Self::NoHeldNights => "NO_HELD_NIGHTS",
        }
    }
}

impl fmt::Display for ConfirmHoldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::HoldNotFound => "hold not found",
            Self::HoldNotActive => "hold is no longer active",
            Self::HoldExpired => "hold has expired",
            Self::NoHeldNights => "hold has no held bed nights",
        };
        f.write_str(text)
    }
}

/// Outcome of confirming a hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConfirmHoldResult {
    /// The booking exists and every held unit is BOOKED.
    Success {
        /// The new booking.
        booking_id: String,
        /// Number of units booked.
        booked_nights: usize,
    },
    /// No booking was written.
    Failure {
        /// Why.
        reason: ConfirmHoldFailure,
    },
}

impl ConfirmHoldResult {
    pub(crate) const fn failed(reason: ConfirmHoldFailure) -> Self {
        Self::Failure { reason }
    }

    /// Whether the booking was created.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<ConfirmHoldFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(*reason),
        }
    }
}
