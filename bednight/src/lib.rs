#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # bednight
//!
//! A library for holding, confirming and expiring bed-night inventory.
//!
//! Every bed on every night is one row in a SQLite ledger. A hold claims a
//! set of rows for a requesting member, each row naming the guest who will
//! sleep there. Confirming the hold turns it into a booking; letting it lapse
//! frees the rows again. Every state change is a conditional update inside a
//! single transaction, so concurrent callers on separate connections can
//! never double-book a bed or put one guest in two beds on the same night.
//!
//! ## Core Types
//!
//! - [`NightDate`], [`BedNightUnit`], [`Hold`], [`Booking`]: ledger rows
//! - [`HoldManager`], [`BookingFinalizer`], [`ExpirySweeper`]: lifecycle operations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use bednight::operations::{seed_units, SeedOptions};
//! use bednight::{CreateHoldCommand, Database, DatabaseConfig, HoldManager, HoldSelection};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
//! let night = "2026-01-10".parse().unwrap();
//! seed_units(&mut db, &SeedOptions::new(vec!["bed-a".into()], night, night)).unwrap();
//!
//! let command = CreateHoldCommand::new("hold-1", "club-1", "member-1", 0, 900_000)
//!     .with_selection(HoldSelection::new("bed-a", night, "guest-1").unwrap());
//! let result = HoldManager::create_hold(&mut db, &command).unwrap();
//! assert!(result.is_success());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod operations;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, LedgerAudit};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{
    BedNightStatus, BedNightUnit, Booking, BookingNightAssignment, BookingStatus, EpochMillis,
    Hold, HoldSelection, HoldStatus, NightDate, ValidationError,
};
pub use operations::{
    BookingFinalizer, ConfirmHoldCommand, ConfirmHoldFailure, ConfirmHoldResult,
    CreateHoldCommand, CreateHoldFailure, CreateHoldResult, ExpirySweeper, HoldManager,
    SweepResult,
};
