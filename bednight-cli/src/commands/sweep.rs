//! Sweep command implementation.

use bednight::{EpochMillis, ExpirySweeper};
use clap::Args;

use crate::error::CliError;
use crate::utils::{
    format_timestamp, json_error, load_configuration, open_database, resolve_now, GlobalOptions,
};

/// Expire every hold that is past due.
#[derive(Args)]
pub struct SweepCommand {
    /// Reference time in epoch milliseconds (defaults to now)
    #[arg(long, value_name = "MILLIS")]
    pub now: Option<EpochMillis>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SweepCommand {
    /// Execute the sweep command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let as_of = resolve_now(self.now);
        if self.dry_run && !global.quiet {
            eprintln!("[DRY RUN] Scanning for holds due at {}...", format_timestamp(as_of));
        }

        let result = ExpirySweeper::sweep(&mut db, as_of, self.dry_run)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result).map_err(json_error)?);
        } else if global.quiet {
            if result.expired_count > 0 {
                println!("{}", result.expired_count);
            }
        } else if self.dry_run {
            eprintln!("[DRY RUN] Would expire {} hold(s)", result.candidates.len());
            if global.verbose {
                for hold_id in &result.candidates {
                    eprintln!("  - {hold_id}");
                }
            }
        } else {
            eprintln!("Expired {} hold(s)", result.expired_count);
            if global.verbose {
                for hold_id in &result.expired_hold_ids {
                    eprintln!("  - {hold_id}");
                }
            }
        }

        Ok(())
    }
}
