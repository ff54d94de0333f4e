//! Add-slot command implementation.

use clap::Args;
use parkpass::{Role, Slot, SlotCode, SlotType};
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Provision a new AVAILABLE slot.
#[derive(Args)]
pub struct AddSlotCommand {
    /// Unique slot code
    #[arg(long, value_name = "CODE")]
    pub slot_code: SlotCode,

    /// Vehicle kind
    #[arg(long, value_enum, ignore_case = true)]
    pub slot_type: SlotType,

    /// Holder role the slot is set aside for
    #[arg(long, value_enum, ignore_case = true)]
    pub role: Role,

    /// Grouping tag (zone, floor, ...)
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,
}

impl AddSlotCommand {
    /// Execute the add-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let slot = Slot::new(self.slot_code, self.slot_type, self.role, self.group.as_deref())?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.add_slot(&slot)?;

        reply::success(&json!({
            "slot_code": slot.code,
            "slot_status": slot.status,
        }))
    }
}
