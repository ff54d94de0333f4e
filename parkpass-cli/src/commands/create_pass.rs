//! Create-pass command implementation.
//!
//! Reserves the requested slot and issues a pass on it, in one transaction.

use clap::Args;
use parkpass::operations::{run, CreatePassPlan};
use parkpass::{Holder, PassRequest, PassType, Role, SlotCode, ValidityWindow};
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Issue a pass on a slot.
#[derive(Args)]
pub struct CreatePassCommand {
    /// Holder role
    #[arg(long, value_enum, ignore_case = true)]
    pub role: Role,

    /// Holder name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Holder email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Holder mobile number
    #[arg(long, value_name = "NUMBER")]
    pub mobile: String,

    /// Pass duration class
    #[arg(long, value_enum, ignore_case = true)]
    pub pass_type: PassType,

    /// Slot to reserve
    #[arg(long, value_name = "CODE")]
    pub slot_code: SlotCode,

    /// First valid day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: String,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: String,

    /// Start time on the first day (HH:MM or HH:MM:SS)
    #[arg(long, value_name = "TIME")]
    pub start_time: String,

    /// End time on the last day (HH:MM or HH:MM:SS)
    #[arg(long, value_name = "TIME")]
    pub end_time: String,

    /// Show what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CreatePassCommand {
    /// Execute the create-pass command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Validate the request before touching the database
        let holder = Holder::new(self.role, self.name, self.email, self.mobile)?;
        let window = ValidityWindow::parse(
            &self.start_date,
            &self.end_date,
            &self.start_time,
            &self.end_time,
        )?;
        let request = PassRequest::new(holder, self.pass_type, self.slot_code, window);

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = run(&mut db, &CreatePassPlan::new(request), self.dry_run)?;
        for warning in &result.warnings {
            global.warn(warning);
        }

        if self.dry_run {
            return reply::dry_run(&result.actions_taken, &result.warnings);
        }

        reply::success(&json!({
            "pass_id": result.pass_id,
            "slot_code": result.slot_code,
        }))
    }
}
