//! List command implementation.
//!
//! This module implements the `list` command, which displays bed nights,
//! holds or bookings in various formats (table, JSON, CSV).

use std::io::Write;

use bednight::config::OutputFormat;
use bednight::{BedNightUnit, Booking, Database, Hold, HoldStatus, NightDate};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::error::CliError;
use crate::utils::{
    csv_error, format_timestamp, json_error, load_configuration, open_database, resolve_format,
    FormatArg, GlobalOptions,
};

const UNIT_HEADERS: [&str; 6] = ["bed", "night", "status", "hold", "booking", "guest"];
const HOLD_HEADERS: [&str; 6] = ["hold", "club", "member", "status", "created_at", "expires_at"];
const BOOKING_HEADERS: [&str; 6] = [
    "booking",
    "club",
    "member",
    "amount",
    "status",
    "confirmed_at",
];

/// What to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ListTarget {
    /// Bed nights in the ledger
    Units,
    /// Holds, newest state included
    Holds,
    /// Confirmed bookings
    Bookings,
}

/// List ledger rows.
#[derive(Args)]
pub struct ListCommand {
    /// Records to list
    #[arg(value_enum, default_value = "units")]
    pub target: ListTarget,

    /// Output format (defaults to the configured output_format)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// First night to include (units only)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NightDate>,

    /// Last night to include (units only)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NightDate>,

    /// Only holds in this state (holds only)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<HoldStatus>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let format = resolve_format(self.format, &config);

        let rows = match self.target {
            ListTarget::Units => self.unit_rows(&db)?,
            ListTarget::Holds => {
                let holds = Database::list_holds(db.connection(), self.status)?;
                Rows::new(HOLD_HEADERS, holds.iter().map(hold_row).collect(), &holds)?
            }
            ListTarget::Bookings => {
                let bookings = Database::list_bookings(db.connection())?;
                Rows::new(
                    BOOKING_HEADERS,
                    bookings.iter().map(booking_row).collect(),
                    &bookings,
                )?
            }
        };

        match format {
            OutputFormat::Table => rows.write_table(),
            OutputFormat::Json => rows.write_json(),
            OutputFormat::Csv => rows.write_csv(),
        }
    }

    fn unit_rows(&self, db: &Database) -> Result<Rows, CliError> {
        let (start, end) = match (self.from, self.to) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, start),
            (None, Some(end)) => (end, end),
            (None, None) => {
                let units = Database::list_units(db.connection())?;
                return Rows::new(
                    UNIT_HEADERS,
                    units.iter().map(unit_row).collect(),
                    &units,
                );
            }
        };
        if end < start {
            return Err(CliError::InvalidArguments(format!(
                "--to {end} is before --from {start}"
            )));
        }
        let units = Database::units_in_range(db.connection(), start, end)?;
        Rows::new(UNIT_HEADERS, units.iter().map(unit_row).collect(), &units)
    }
}

/// Rendered rows plus their JSON form.
struct Rows {
    headers: [&'static str; 6],
    cells: Vec<[String; 6]>,
    json: serde_json::Value,
}

impl Rows {
    fn new<T: Serialize>(
        headers: [&'static str; 6],
        cells: Vec<[String; 6]>,
        records: &[T],
    ) -> Result<Self, CliError> {
        Ok(Self {
            headers,
            cells,
            json: serde_json::to_value(records).map_err(json_error)?,
        })
    }

    fn write_table(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        let header_line = self
            .headers
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(handle, "{header_line}")?;

        for row in &self.cells {
            let line = row
                .iter()
                .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(handle, "{line}")?;
        }
        Ok(())
    }

    fn write_json(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &self.json).map_err(json_error)?;
        writeln!(handle)?;
        Ok(())
    }

    fn write_csv(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut writer = csv::Writer::from_writer(stdout.lock());
        writer.write_record(self.headers).map_err(csv_error)?;
        for row in &self.cells {
            writer.write_record(row).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn unit_row(unit: &BedNightUnit) -> [String; 6] {
    [
        unit.bed_id.clone(),
        unit.night_date.to_string(),
        unit.status.to_string(),
        unit.hold_id.clone().unwrap_or_default(),
        unit.booking_id.clone().unwrap_or_default(),
        unit.guest_member_id.clone().unwrap_or_default(),
    ]
}

fn hold_row(hold: &Hold) -> [String; 6] {
    [
        hold.hold_id.clone(),
        hold.club_id.clone(),
        hold.member_id.clone(),
        hold.status.to_string(),
        format_timestamp(hold.created_at),
        format_timestamp(hold.expires_at),
    ]
}

fn booking_row(booking: &Booking) -> [String; 6] {
    [
        booking.booking_id.clone(),
        booking.club_id.clone(),
        booking.member_id.clone(),
        booking.total_amount.to_string(),
        booking.status.to_string(),
        format_timestamp(booking.confirmed_at),
    ]
}
