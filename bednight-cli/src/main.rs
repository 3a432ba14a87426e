//! Main entry point for the bednight CLI.
//!
//! Holds, confirms and expires club bed nights in a local `SQLite` ledger.
//! Exit codes: 0 success, 1 business failure, 2 lock timeout, 3 missing data
//! directory, 4 invalid arguments, 5 I/O, 6 library error, 7 configuration,
//! 8 consistency fault. Argument parsing errors also exit with 4.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 4 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    bednight::init_logger(cli.verbose, cli.quiet).install();

    let global = cli.global_options();

    match cli.command.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
