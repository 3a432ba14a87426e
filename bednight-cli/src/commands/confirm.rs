//! Confirm command implementation.

use bednight::{BookingFinalizer, ConfirmHoldCommand, ConfirmHoldResult, EpochMillis};
use clap::Args;

use crate::error::CliError;
use crate::utils::{json_error, load_configuration, open_database, resolve_now, GlobalOptions};

/// Turn an active hold into a booking.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Hold to confirm
    #[arg(value_name = "HOLD_ID")]
    pub hold_id: String,

    /// Booking identifier to create
    #[arg(long = "booking-id", value_name = "BOOKING_ID")]
    pub booking_id: String,

    /// Amount charged, in minor currency units
    #[arg(long, value_name = "AMOUNT")]
    pub amount: i64,

    /// Confirmation time in epoch milliseconds (defaults to now)
    #[arg(long, value_name = "MILLIS")]
    pub now: Option<EpochMillis>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let command = ConfirmHoldCommand::new(
            self.hold_id,
            self.booking_id,
            self.amount,
            resolve_now(self.now),
        );
        let result = BookingFinalizer::confirm_hold(&mut db, &command)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result).map_err(json_error)?);
        }

        match result {
            ConfirmHoldResult::Success {
                booking_id,
                booked_nights,
            } => {
                if !self.json {
                    if global.quiet {
                        println!("{booking_id}");
                    } else {
                        println!(
                            "Confirmed {} as booking {booking_id} ({booked_nights} bed night(s))",
                            command.hold_id
                        );
                    }
                }
                Ok(())
            }
            ConfirmHoldResult::Failure { reason } => Err(CliError::BusinessFailure(format!(
                "Hold {} not confirmed: {reason} ({})",
                command.hold_id,
                reason.code()
            ))),
        }
    }
}
