//! Request-extension command implementation.

use clap::Args;
use parkpass::operations::{run, RequestExtensionPlan};
use parkpass::PassId;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Ask for an active pass to be extended.
///
/// The pass waits in PENDING_EXTENSION until an administrator approves or
/// rejects the request.
#[derive(Args)]
pub struct RequestExtensionCommand {
    /// Pass to extend
    #[arg(long, value_name = "ID")]
    pub pass_id: PassId,

    /// Show what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl RequestExtensionCommand {
    /// Execute the request-extension command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = run(&mut db, &RequestExtensionPlan::new(self.pass_id), self.dry_run)?;

        if self.dry_run {
            reply::dry_run(&result.actions_taken, &result.warnings)
        } else {
            reply::message("Extension request submitted")
        }
    }
}
