//! Hold lifecycle operations.
//!
//! Each operation owns one IMMEDIATE transaction and either commits all of
//! its row changes or none of them. Business failures come back as typed
//! outcomes ([`CreateHoldResult`], [`ConfirmHoldResult`]); `Err` is reserved
//! for infrastructure problems and consistency faults.
//!
//! # Examples
//!
//! ```no_run
//! use bednight::database::{Database, DatabaseConfig};
//! use bednight::operations::{
//!     seed_units, BookingFinalizer, ConfirmHoldCommand, CreateHoldCommand, ExpirySweeper,
//!     HoldManager, SeedOptions,
//! };
//! use bednight::HoldSelection;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
//! let night = "2026-01-10".parse().unwrap();
//! seed_units(&mut db, &SeedOptions::new(vec!["bed-a".into()], night, night)).unwrap();
//!
//! let hold = CreateHoldCommand::new("hold-1", "club-1", "member-1", 1_000, 20_000)
//!     .with_selection(HoldSelection::new("bed-a", night, "guest-1").unwrap());
//! HoldManager::create_hold(&mut db, &hold).unwrap();
//!
//! let confirm = ConfirmHoldCommand::new("hold-1", "booking-1", 42_000, 15_000);
//! BookingFinalizer::confirm_hold(&mut db, &confirm).unwrap();
//!
//! ExpirySweeper::sweep(&mut db, 30_000, false).unwrap();
//! ```

pub mod confirm;
pub mod holds;
pub mod init;
pub mod outcome;
pub mod seed;
pub mod sweep;

#[cfg(test)]
mod proptests;

pub use confirm::{BookingFinalizer, ConfirmHoldCommand};
pub use holds::{CreateHoldCommand, HoldManager};
pub use init::{init_database, InitOptions, InitResult};
pub use outcome::{ConfirmHoldFailure, ConfirmHoldResult, CreateHoldFailure, CreateHoldResult};
pub use seed::{seed_units, SeedOptions, SeedResult};
pub use sweep::{ExpirySweeper, SweepResult};
