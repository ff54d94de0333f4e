//! Reserve-slot command implementation.

use clap::Args;
use parkpass::SlotCode;
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Reserve an AVAILABLE slot without issuing a pass.
#[derive(Args)]
pub struct ReserveSlotCommand {
    /// Slot to reserve
    #[arg(long, value_name = "CODE")]
    pub slot_code: SlotCode,
}

impl ReserveSlotCommand {
    /// Execute the reserve-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let slot = db.reserve_slot(&self.slot_code)?;
        reply::success(&json!({
            "slot_code": slot.code,
            "slot_status": slot.status,
        }))
    }
}
