//! Find-slot command implementation.

use clap::Args;
use parkpass::{Role, SlotType};
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Find the first AVAILABLE slot matching a type and role.
///
/// Nothing is reserved.
#[derive(Args)]
pub struct FindSlotCommand {
    /// Vehicle kind
    #[arg(long, value_enum, ignore_case = true)]
    pub slot_type: SlotType,

    /// Holder role
    #[arg(long, value_enum, ignore_case = true)]
    pub role: Role,

    /// Only consider this group (default: `default_slot_group` from config)
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,
}

impl FindSlotCommand {
    /// Execute the find-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let group = self.group.or_else(|| config.default_slot_group.clone());
        match db.get_available_slot(self.slot_type, self.role, group.as_deref())? {
            Some(slot) => reply::success(&json!({ "slot": slot })),
            None => Err(CliError::SemanticFailure(format!(
                "No available {} slot for {} holders",
                self.slot_type, self.role
            ))),
        }
    }
}
