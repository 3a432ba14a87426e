//! Expire command implementation.
//!
//! Expires a single hold if it is past due. See `sweep` for expiring every
//! due hold at once.

use bednight::{EpochMillis, HoldManager};
use clap::Args;

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, resolve_now, GlobalOptions};

/// Expire one hold if it is past due.
#[derive(Args)]
pub struct ExpireCommand {
    /// Hold to expire
    #[arg(value_name = "HOLD_ID")]
    pub hold_id: String,

    /// Reference time in epoch milliseconds (defaults to now)
    #[arg(long, value_name = "MILLIS")]
    pub now: Option<EpochMillis>,
}

impl ExpireCommand {
    /// Execute the expire command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let as_of = resolve_now(self.now);
        if !HoldManager::expire_hold_if_past_due(&mut db, &self.hold_id, as_of)? {
            return Err(CliError::BusinessFailure(format!(
                "Hold {} is not active or not yet due at {}",
                self.hold_id,
                format_timestamp(as_of)
            )));
        }

        if !global.quiet {
            println!("Expired hold {}", self.hold_id);
        }
        Ok(())
    }
}
