//! Show command implementation.
//!
//! Prints one hold with the bed nights it references, or one booking with its
//! guest assignments.

use bednight::{BookingFinalizer, HoldManager};
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{format_timestamp, json_error, load_configuration, open_database, GlobalOptions};

/// Show a single hold or booking.
#[derive(Args)]
pub struct ShowCommand {
    #[command(subcommand)]
    pub record: ShowRecord,

    /// Print the record as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Record kinds that can be shown.
#[derive(Subcommand)]
pub enum ShowRecord {
    /// Show a hold and its bed nights
    Hold {
        /// Hold identifier
        #[arg(value_name = "HOLD_ID")]
        hold_id: String,
    },
    /// Show a booking and its guest assignments
    Booking {
        /// Booking identifier
        #[arg(value_name = "BOOKING_ID")]
        booking_id: String,
    },
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        match self.record {
            ShowRecord::Hold { hold_id } => {
                let hold = HoldManager::get_hold(&db, &hold_id)?
                    .ok_or_else(|| CliError::BusinessFailure(format!("Hold {hold_id} not found")))?;
                let units = HoldManager::hold_units(&db, &hold_id)?;

                if self.json {
                    let value = serde_json::json!({ "hold": hold, "units": units });
                    println!("{}", serde_json::to_string_pretty(&value).map_err(json_error)?);
                    return Ok(());
                }

                println!("Hold:       {}", hold.hold_id);
                println!("Club:       {}", hold.club_id);
                println!("Member:     {}", hold.member_id);
                println!("Status:     {}", hold.status);
                println!("Created:    {}", format_timestamp(hold.created_at));
                println!("Expires:    {}", format_timestamp(hold.expires_at));
                for unit in units {
                    println!(
                        "  {} {} {} guest={}",
                        unit.bed_id,
                        unit.night_date,
                        unit.status,
                        unit.guest_member_id.as_deref().unwrap_or("-")
                    );
                }
            }
            ShowRecord::Booking { booking_id } => {
                let booking = BookingFinalizer::get_booking(&db, &booking_id)?.ok_or_else(|| {
                    CliError::BusinessFailure(format!("Booking {booking_id} not found"))
                })?;
                let assignments = BookingFinalizer::booking_assignments(&db, &booking_id)?;

                if self.json {
                    let value = serde_json::json!({
                        "booking": booking,
                        "assignments": assignments,
                    });
                    println!("{}", serde_json::to_string_pretty(&value).map_err(json_error)?);
                    return Ok(());
                }

                println!("Booking:    {}", booking.booking_id);
                println!("Club:       {}", booking.club_id);
                println!("Member:     {}", booking.member_id);
                println!("Amount:     {}", booking.total_amount);
                println!("Status:     {}", booking.status);
                println!("Confirmed:  {}", format_timestamp(booking.confirmed_at));
                for assignment in assignments {
                    println!(
                        "  {} {} guest={}",
                        assignment.bed_id, assignment.night_date, assignment.guest_member_id
                    );
                }
            }
        }

        Ok(())
    }
}
