//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AuditCommand, CancelCommand, CompletionsCommand, ConfirmCommand, ExpireCommand, HoldCommand,
    InitCommand, ListCommand, SeedCommand, ShowCommand, SweepCommand,
};
use crate::utils::GlobalOptions;

/// Command-line tool for holding and booking club bed nights.
#[derive(Parser)]
#[command(name = "bednight")]
#[command(version, about = "Hold and book club bed nights", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "BEDNIGHT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "BEDNIGHT_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "BEDNIGHT_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Options shared by every command.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            disable_autoinit: self.disable_autoinit,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Add bed nights to the ledger
    Seed(SeedCommand),

    /// Hold bed nights for a member's guests
    Hold(HoldCommand),

    /// Confirm an active hold as a booking
    Confirm(ConfirmCommand),

    /// Cancel an active hold
    Cancel(CancelCommand),

    /// Expire one hold if it is past due
    Expire(ExpireCommand),

    /// Expire every past-due hold
    Sweep(SweepCommand),

    /// List bed nights, holds or bookings
    List(ListCommand),

    /// Show a single hold or booking
    Show(ShowCommand),

    /// Check ledger consistency
    Audit(AuditCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

impl Command {
    /// Run the selected command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), crate::error::CliError> {
        match self {
            Self::Init(cmd) => cmd.execute(global),
            Self::Seed(cmd) => cmd.execute(global),
            Self::Hold(cmd) => cmd.execute(global),
            Self::Confirm(cmd) => cmd.execute(global),
            Self::Cancel(cmd) => cmd.execute(global),
            Self::Expire(cmd) => cmd.execute(global),
            Self::Sweep(cmd) => cmd.execute(global),
            Self::List(cmd) => cmd.execute(global),
            Self::Show(cmd) => cmd.execute(global),
            Self::Audit(cmd) => cmd.execute(global),
            Self::Completions(cmd) => cmd.execute(global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_hold_with_repeated_selections() {
        let cli = Cli::try_parse_from([
            "bednight",
            "hold",
            "--id",
            "h1",
            "--club",
            "c1",
            "--member",
            "m1",
            "--select",
            "bed-a:2026-01-10:g1",
            "--select",
            "bed-b:2026-01-10:g2",
        ])
        .unwrap();
        match cli.command {
            Command::Hold(cmd) => assert_eq!(cmd.selections.len(), 2),
            _ => panic!("expected hold"),
        }
    }

    #[test]
    fn rejects_malformed_selection() {
        assert!(Cli::try_parse_from([
            "bednight", "hold", "--id", "h1", "--club", "c1", "--member", "m1", "--select",
            "bed-a:not-a-date:g1",
        ])
        .is_err());
    }

    #[test]
    fn global_flags_flow_into_options() {
        let cli = Cli::try_parse_from([
            "bednight",
            "--quiet",
            "--busy-timeout",
            "3",
            "--data-dir",
            "/tmp/bednight-test",
            "sweep",
        ])
        .unwrap();
        let global = cli.global_options();
        assert!(global.quiet);
        assert_eq!(global.busy_timeout, Some(3));
        assert_eq!(global.data_dir, Some(PathBuf::from("/tmp/bednight-test")));
    }
}
