//! Database layer for the bed-night ledger, holds and bookings.
//!
//! This module provides a SQLite-based storage layer: connection management,
//! schema versioning, the conditional-update ledger primitives, and row access
//! for holds and bookings. Row-level functions take a `&Connection` so they
//! compose inside one caller-owned transaction.
//!
//! # Examples
//!
//! ```no_run
//! use bednight::database::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/bednight.db")).unwrap();
//! let night = "2026-01-10".parse().unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! Database::insert_unit_if_absent(&tx, "bed-a", night).unwrap();
//! tx.commit().unwrap();
//!
//! let unit = Database::get_unit(db.connection(), "bed-a", night).unwrap();
//! println!("{unit:?}");
//! ```

mod audit;
mod bookings;
mod config;
mod connection;
mod holds;
pub mod ledger;
pub mod migrations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use audit::LedgerAudit;
pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
