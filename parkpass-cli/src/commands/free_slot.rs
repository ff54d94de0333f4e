//! Free-slot command implementation.

use clap::Args;
use parkpass::SlotCode;
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Return a slot to AVAILABLE, whatever its current status.
///
/// Passes bound to the slot are not touched; use `cancel-pass` to end a
/// pass and free its slot together.
#[derive(Args)]
pub struct FreeSlotCommand {
    /// Slot to free
    #[arg(long, value_name = "CODE")]
    pub slot_code: SlotCode,
}

impl FreeSlotCommand {
    /// Execute the free-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let slot = db.free_slot(&self.slot_code)?;
        reply::success(&json!({
            "slot_code": slot.code,
            "slot_status": slot.status,
        }))
    }
}
