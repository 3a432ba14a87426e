//! CLI command implementations.
//!
//! - `init`: Create the data directory, database and config template
//! - `seed`: Add bed nights to the ledger
//! - `hold`: Hold bed nights for a member's guests
//! - `confirm`: Turn an active hold into a booking
//! - `cancel`: Cancel an active hold
//! - `expire`: Expire one past-due hold
//! - `sweep`: Expire every past-due hold
//! - `list`: List bed nights, holds or bookings
//! - `show`: Show one hold or booking
//! - `audit`: Check ledger consistency
//! - `completions`: Generate shell completion scripts

pub mod audit;
pub mod cancel;
pub mod completions;
pub mod confirm;
pub mod expire;
pub mod hold;
pub mod init;
pub mod list;
pub mod seed;
pub mod show;
pub mod sweep;

pub use audit::AuditCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use confirm::ConfirmCommand;
pub use expire::ExpireCommand;
pub use hold::HoldCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use seed::SeedCommand;
pub use show::ShowCommand;
pub use sweep::SweepCommand;
