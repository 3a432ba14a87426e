//! Cancel command implementation.

use bednight::HoldManager;
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Cancel an active hold and release its bed nights.
#[derive(Args)]
pub struct CancelCommand {
    /// Hold to cancel
    #[arg(value_name = "HOLD_ID")]
    pub hold_id: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    ///
    /// A hold that is missing or already terminal is left alone and reported
    /// as a business failure.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if !HoldManager::cancel_hold(&mut db, &self.hold_id)? {
            return Err(CliError::BusinessFailure(format!(
                "Hold {} is not active; nothing cancelled",
                self.hold_id
            )));
        }

        if !global.quiet {
            println!("Cancelled hold {}", self.hold_id);
        }
        Ok(())
    }
}
