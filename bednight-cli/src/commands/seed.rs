//! Seed command implementation.

use bednight::operations::{seed_units, SeedOptions};
use bednight::NightDate;
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Create AVAILABLE bed nights for a range of dates.
#[derive(Args)]
pub struct SeedCommand {
    /// Bed to seed (repeatable)
    #[arg(long = "bed", value_name = "BED", required = true)]
    pub beds: Vec<String>,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: NightDate,

    /// Last night, inclusive (defaults to --from)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NightDate>,
}

impl SeedCommand {
    /// Execute the seed command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let end = self.to.unwrap_or(self.from);
        let result = seed_units(&mut db, &SeedOptions::new(self.beds, self.from, end))?;

        if global.quiet {
            println!("{}", result.inserted);
        } else {
            println!(
                "Seeded {} bed night(s) from {} to {} ({} already present)",
                result.inserted, self.from, end, result.existing
            );
        }
        Ok(())
    }
}
