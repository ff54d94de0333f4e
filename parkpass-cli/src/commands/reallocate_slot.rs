//! Reallocate-slot command implementation.

use clap::Args;
use parkpass::SlotCode;
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Move a holding to another AVAILABLE slot of the same type and role.
///
/// A grouped slot stays within its group; an ungrouped one may move anywhere.
///
/// The current slot becomes FREED. Passes bound to it are not rebound;
/// extension approval does that.
#[derive(Args)]
pub struct ReallocateSlotCommand {
    /// Slot to move away from
    #[arg(long, value_name = "CODE")]
    pub slot_code: SlotCode,
}

impl ReallocateSlotCommand {
    /// Execute the reallocate-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match db.reallocate_slot(&self.slot_code)? {
            Some(slot) => reply::success(&json!({ "new_slot": slot.code })),
            None => Err(CliError::SemanticFailure(format!(
                "No alternate slot available for {}",
                self.slot_code
            ))),
        }
    }
}
