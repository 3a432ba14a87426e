//! Common test utilities for CLI integration tests.
//!
//! Every test gets an isolated data directory and a fixed clock so hold
//! expiry is deterministic.

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// 2026-01-01 00:00:00 UTC in epoch milliseconds.
#[allow(dead_code)]
pub const NOW: i64 = 1_767_225_600_000;

/// Default hold length in milliseconds.
#[allow(dead_code)]
pub const HOLD_MILLIS: i64 = 15 * 60 * 1000;

const BEDNIGHT_ENV: [&str; 8] = [
    "BEDNIGHT_DATA_DIR",
    "BEDNIGHT_BUSY_TIMEOUT",
    "BEDNIGHT_DISABLE_AUTOINIT",
    "BEDNIGHT_HOLD_MINUTES",
    "BEDNIGHT_MAXIMUM_LOCK_WAIT_SECONDS",
    "BEDNIGHT_SWEEP_ON_HOLD",
    "BEDNIGHT_OUTPUT_FORMAT",
    "BEDNIGHT_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the bednight data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("bednight-data");
        Self { temp_dir, data_dir }
    }

    /// Command with only the binary and a scrubbed environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("bednight").expect("Failed to find bednight binary");
        for var in BEDNIGHT_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path to the ledger database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("bednight.db")
    }

    /// Temporary root directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Seed AVAILABLE bed nights for each bed over `from..=to`.
    pub fn seed(&self, beds: &[&str], from: &str, to: &str) {
        let mut cmd = self.command();
        cmd.arg("seed");
        for bed in beds {
            cmd.arg("--bed").arg(bed);
        }
        cmd.arg("--from").arg(from).arg("--to").arg(to);
        cmd.assert().success();
    }

    /// Place a hold at `now` and return the raw output.
    pub fn hold_at(&self, hold_id: &str, selections: &[&str], now: i64) -> Output {
        let mut cmd = self.command();
        cmd.args(["hold", "--id", hold_id, "--club", "club-1", "--member", "member-1"])
            .arg("--now")
            .arg(now.to_string());
        for selection in selections {
            cmd.arg("--select").arg(selection);
        }
        cmd.output().expect("Failed to run hold command")
    }

    /// Place a hold at [`NOW`], asserting success.
    pub fn hold(&self, hold_id: &str, selections: &[&str]) {
        let output = self.hold_at(hold_id, selections, NOW);
        assert!(
            output.status.success(),
            "Hold failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Run a command and return its stdout, asserting success.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Open the ledger directly.
    pub fn open_raw(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(self.database_path()).expect("Failed to open database")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
