//! Hold command implementation.
//!
//! Places a hold over one or more bed nights. Past-due holds are swept first
//! (unless disabled) so that lapsed claims do not block the new one.

use bednight::config::ConfigValidator;
use bednight::{
    CreateHoldCommand, CreateHoldResult, EpochMillis, ExpirySweeper, HoldManager, HoldSelection,
};
use clap::Args;

use crate::error::CliError;
use crate::utils::{
    format_timestamp, json_error, load_configuration, open_database, resolve_now, GlobalOptions,
};

/// Hold bed nights for a member's guests.
#[derive(Args)]
pub struct HoldCommand {
    /// Hold identifier chosen by the caller
    #[arg(long = "id", value_name = "HOLD_ID")]
    pub hold_id: String,

    /// Club that owns the inventory
    #[arg(long, value_name = "CLUB_ID")]
    pub club: String,

    /// Requesting member
    #[arg(long, value_name = "MEMBER_ID")]
    pub member: String,

    /// Bed night and guest as BED:YYYY-MM-DD:GUEST (repeatable)
    #[arg(long = "select", value_name = "BED:NIGHT:GUEST", required = true)]
    pub selections: Vec<HoldSelection>,

    /// Hold length in minutes (defaults to the configured hold_minutes)
    #[arg(long, value_name = "MINUTES")]
    pub minutes: Option<u32>,

    /// Creation time in epoch milliseconds (defaults to now)
    #[arg(long, value_name = "MILLIS")]
    pub now: Option<EpochMillis>,

    /// Do not sweep past-due holds first
    #[arg(long)]
    pub no_sweep: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl HoldCommand {
    /// Execute the hold command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut config = load_configuration(global)?;
        if let Some(minutes) = self.minutes {
            config.hold_minutes = Some(minutes);
            ConfigValidator::validate(&config)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        }
        let mut db = open_database(global, &config)?;

        let created_at = resolve_now(self.now);
        if config.sweep_on_hold() && !self.no_sweep {
            let swept = ExpirySweeper::sweep(&mut db, created_at, false)?;
            if global.verbose && swept.expired_count > 0 {
                eprintln!("Expired {} past-due hold(s) first", swept.expired_count);
            }
        }

        let expires_at = config.hold_expiry(created_at);
        let command = CreateHoldCommand::new(
            self.hold_id,
            self.club,
            self.member,
            created_at,
            expires_at,
        )
        .with_selections(self.selections);
        let result = HoldManager::create_hold(&mut db, &command)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result).map_err(json_error)?);
        }

        match result {
            CreateHoldResult::Success {
                hold_id,
                held_count,
            } => {
                if !self.json {
                    if global.quiet {
                        println!("{hold_id}");
                    } else {
                        println!(
                            "Held {held_count} bed night(s) as {hold_id} until {}",
                            format_timestamp(expires_at)
                        );
                    }
                }
                Ok(())
            }
            CreateHoldResult::Failure { reason } => Err(CliError::BusinessFailure(format!(
                "Hold not placed: {reason} ({})",
                reason.code()
            ))),
        }
    }
}
