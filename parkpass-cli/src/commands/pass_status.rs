//! Pass-status command implementation.

use clap::Args;
use parkpass::operations::pass_status;
use parkpass::{Pass, PassId};
use serde_json::{json, Value};

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Show the current state of a pass.
#[derive(Args)]
pub struct PassStatusCommand {
    /// Pass to show
    #[arg(value_name = "PASS_ID")]
    pub pass_id: PassId,
}

impl PassStatusCommand {
    /// Execute the pass-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let pass = pass_status(db.connection(), self.pass_id)?;
        reply::success(&snapshot(&pass))
    }
}

/// The fields a status query reports.
fn snapshot(pass: &Pass) -> Value {
    let window = &pass.window;
    json!({
        "pass_id": pass.id,
        "user_name": pass.holder.name,
        "user_role": pass.holder.role,
        "slot_code": pass.slot_code,
        "status": pass.status,
        "arrived": pass.arrived,
        "start_date": window.start_date.to_string(),
        "end_date": window.end_date.to_string(),
        "start_time": window.start_time.format("%H:%M:%S").to_string(),
        "end_time": window.end_time.format("%H:%M:%S").to_string(),
    })
}
