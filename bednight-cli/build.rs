//! Build script for bednight-cli.
//!
//! Generates the `bednight.1` man page into `OUT_DIR` using clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command tree
//! is described here by hand.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("bednight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hold and book club bed nights")
        .long_about(
            "Command-line tool for holding, confirming and expiring club bed nights \
             in a local SQLite ledger",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("BEDNIGHT_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("BEDNIGHT_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("BEDNIGHT_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the data directory, the ledger database and a config template"),
            Command::new("seed")
                .about("Add bed nights to the ledger")
                .long_about("Create AVAILABLE bed nights for each bed over a range of nights"),
            Command::new("hold")
                .about("Hold bed nights for a member's guests")
                .long_about("Atomically hold every selected bed night, or none of them"),
            Command::new("confirm")
                .about("Confirm an active hold as a booking")
                .long_about("Turn an active, unexpired hold into a booking"),
            Command::new("cancel")
                .about("Cancel an active hold")
                .long_about("Cancel an active hold and release its bed nights"),
            Command::new("expire")
                .about("Expire one hold if it is past due")
                .long_about("Expire a single active hold whose expiry has passed"),
            Command::new("sweep")
                .about("Expire every past-due hold")
                .long_about("Expire all active holds whose expiry has passed"),
            Command::new("list")
                .about("List bed nights, holds or bookings")
                .long_about("Display ledger rows as a table, JSON or CSV"),
            Command::new("show")
                .about("Show a single hold or booking")
                .long_about("Display one hold with its bed nights or one booking with its guests"),
            Command::new("audit")
                .about("Check ledger consistency")
                .long_about("Report bed nights whose owners disagree with their status"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("bednight.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
