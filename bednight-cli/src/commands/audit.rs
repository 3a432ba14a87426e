//! Audit command implementation.

use bednight::Database;
use clap::Args;

use crate::error::CliError;
use crate::utils::{json_error, load_configuration, open_database, GlobalOptions};

/// Check the ledger for rows that break the ownership rules.
///
/// Exits with the business-failure code when any problem is found.
#[derive(Args)]
pub struct AuditCommand {
    /// Also run SQLite's integrity check
    #[arg(long)]
    pub integrity: bool,

    /// Print the findings as JSON
    #[arg(long)]
    pub json: bool,
}

impl AuditCommand {
    /// Execute the audit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if self.integrity {
            db.verify_integrity()?;
            if global.verbose {
                eprintln!("SQLite integrity check passed");
            }
        }

        let audit = Database::audit_ledger(db.connection())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&audit).map_err(json_error)?);
        } else if !global.quiet {
            for problem in &audit.problems {
                eprintln!("  - {problem}");
            }
            eprintln!(
                "Checked {} bed night(s) and {} hold(s): {} problem(s)",
                audit.units_checked,
                audit.holds_checked,
                audit.problems.len()
            );
        }

        audit.into_result()?;
        Ok(())
    }
}
