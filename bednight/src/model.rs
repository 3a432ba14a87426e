//! Domain types for bed-night inventory, holds and bookings.
//!
//! This module provides the row-level types stored by the ledger along with
//! the status enums that drive the hold lifecycle. Status enums and
//! [`NightDate`] convert to and from SQLite values directly so queries can
//! bind them without string juggling at every call site.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, as supplied by the caller.
///
/// The engine never reads the wall clock itself; every timestamp is passed in.
pub type EpochMillis = i64;

/// Storage format for night dates. ISO ordering matches calendar ordering.
const NIGHT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a domain value fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A calendar night, stored as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use bednight::NightDate;
///
/// let night: NightDate = "2026-01-10".parse().unwrap();
/// assert_eq!(night.to_string(), "2026-01-10");
/// assert_eq!(night.succ().to_string(), "2026-01-11");
/// assert!("2026-02-30".parse::<NightDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NightDate(NaiveDate);

impl NightDate {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the following night.
    ///
    /// Saturates at the last representable date.
    #[must_use]
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Iterates every night from `self` to `end`, both inclusive.
    ///
    /// Yields nothing when `end` is before `self`.
    pub fn through(self, end: Self) -> impl Iterator<Item = NightDate> {
        self.0
            .iter_days()
            .take_while(move |date| *date <= end.0)
            .map(NightDate)
    }
}

impl FromStr for NightDate {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), NIGHT_DATE_FORMAT)
            .map(Self)
            .map_err(|e| crate::Error::InvalidNightDate {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TryFrom<String> for NightDate {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NightDate> for String {
    fn from(night: NightDate) -> Self {
        night.to_string()
    }
}

impl fmt::Display for NightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(NIGHT_DATE_FORMAT))
    }
}

impl ToSql for NightDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for NightDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Declares a status enum stored as its upper-case name.
macro_rules! stored_status {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Returns the stored representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ValidationError {
                        field: stringify!($name).into(),
                        message: format!("unknown status '{s}'"),
                    }),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

stored_status! {
    /// Occupancy state of a single bed night.
    BedNightStatus {
        /// Free to be held.
        Available => "AVAILABLE",
        /// Claimed by an active hold.
        Held => "HELD",
        /// Owned by a confirmed booking.
        Booked => "BOOKED",
    }
}

stored_status! {
    /// Lifecycle state of a hold.
    ///
    /// `Active` is the only non-terminal state.
    HoldStatus {
        /// Holding inventory, awaiting confirmation.
        Active => "ACTIVE",
        /// Released because its expiry passed.
        Expired => "EXPIRED",
        /// Converted into a booking.
        Confirmed => "CONFIRMED",
        /// Released by the caller.
        Cancelled => "CANCELLED",
    }
}

stored_status! {
    /// State of a booking record.
    BookingStatus {
        /// Finalized booking.
        Confirmed => "CONFIRMED",
        /// Cancelled booking.
        Cancelled => "CANCELLED",
    }
}

impl HoldStatus {
    /// Whether no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// One requested bed night inside a hold request.
///
/// # Examples
///
/// ```
/// use bednight::HoldSelection;
///
/// let selection = HoldSelection::new("bed-a", "2026-01-10".parse().unwrap(), "guest-1").unwrap();
/// assert_eq!(selection.bed_id, "bed-a");
/// assert!(HoldSelection::new("", "2026-01-10".parse().unwrap(), "guest-1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldSelection {
    /// Bed to hold.
    pub bed_id: String,
    /// Night to hold.
    pub night_date: NightDate,
    /// Member who will sleep in the bed.
    pub guest_member_id: String,
}

impl HoldSelection {
    /// Creates a selection, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if `bed_id` or `guest_member_id` is empty after trimming.
    pub fn new(
        bed_id: impl Into<String>,
        night_date: NightDate,
        guest_member_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let bed_id = non_blank("bed_id", bed_id.into())?;
        let guest_member_id = non_blank("guest_member_id", guest_member_id.into())?;
        Ok(Self {
            bed_id,
            night_date,
            guest_member_id,
        })
    }
}

impl FromStr for HoldSelection {
    type Err = crate::Error;

    /// Parses `BED:NIGHT:GUEST`, e.g. `bed-a:2026-01-10:guest-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(bed), Some(night), Some(guest)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(crate::Error::Validation {
                field: "selection".into(),
                message: format!("expected BED:NIGHT:GUEST, got '{s}'"),
            });
        };
        Ok(Self::new(bed, night.parse()?, guest)?)
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty after trimming whitespace"),
        });
    }
    Ok(trimmed.to_string())
}

/// A single reservable bed on a single night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedNightUnit {
    /// Bed identifier.
    pub bed_id: String,
    /// Calendar night.
    pub night_date: NightDate,
    /// Current occupancy state.
    pub status: BedNightStatus,
    /// Owning hold while `Held`.
    pub hold_id: Option<String>,
    /// Owning booking while `Booked`.
    pub booking_id: Option<String>,
    /// Occupant while `Held` or `Booked`.
    pub guest_member_id: Option<String>,
}

impl BedNightUnit {
    /// Creates an unowned, available unit.
    #[must_use]
    pub fn available(bed_id: impl Into<String>, night_date: NightDate) -> Self {
        Self {
            bed_id: bed_id.into(),
            night_date,
            status: BedNightStatus::Available,
            hold_id: None,
            booking_id: None,
            guest_member_id: None,
        }
    }

    /// Describes how this row breaks the ownership rules, if it does.
    ///
    /// # Examples
    ///
    /// ```
    /// use bednight::{BedNightStatus, BedNightUnit};
    ///
    /// let mut unit = BedNightUnit::available("bed-a", "2026-01-10".parse().unwrap());
    /// assert!(unit.ownership_problem().is_none());
    ///
    /// unit.status = BedNightStatus::Held;
    /// assert!(unit.ownership_problem().is_some());
    /// ```
    #[must_use]
    pub fn ownership_problem(&self) -> Option<String> {
        let owners = (
            self.hold_id.is_some(),
            self.booking_id.is_some(),
            self.guest_member_id.is_some(),
        );
        let ok = match self.status {
            BedNightStatus::Available => owners == (false, false, false),
            BedNightStatus::Held => owners.0 && !owners.1,
            BedNightStatus::Booked => !owners.0 && owners.1,
        };
        if ok {
            None
        } else {
            Some(format!(
                "{} {} is {} with hold={:?} booking={:?} guest={:?}",
                self.bed_id,
                self.night_date,
                self.status,
                self.hold_id,
                self.booking_id,
                self.guest_member_id
            ))
        }
    }
}

/// A time-boxed claim over one or more bed nights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    /// Hold identifier.
    pub hold_id: String,
    /// Club that owns the inventory.
    pub club_id: String,
    /// Requesting member.
    pub member_id: String,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Time at or after which the hold may be expired.
    pub expires_at: EpochMillis,
    /// Lifecycle state.
    pub status: HoldStatus,
}

impl Hold {
    /// Whether the hold is active and `as_of` has reached its expiry.
    #[must_use]
    pub const fn is_due(&self, as_of: EpochMillis) -> bool {
        matches!(self.status, HoldStatus::Active) && as_of >= self.expires_at
    }
}

/// A finalized booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking identifier.
    pub booking_id: String,
    /// Club that owns the inventory.
    pub club_id: String,
    /// Member who made the booking.
    pub member_id: String,
    /// Amount charged, in minor currency units.
    pub total_amount: i64,
    /// Booking state.
    pub status: BookingStatus,
    /// Confirmation time.
    pub confirmed_at: EpochMillis,
}

/// Snapshot of which guest occupied which unit under a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingNightAssignment {
    /// Owning booking.
    pub booking_id: String,
    /// Bed.
    pub bed_id: String,
    /// Night.
    pub night_date: NightDate,
    /// Occupant.
    pub guest_member_id: String,
}
